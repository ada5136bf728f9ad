//! The landing page: layout, every timeline, and the per-frame view.

use crema_config::Config;
use crema_core::{DeviceClass, Point, Property, PropertySet, Rect, Viewport};
use crema_motion::{
    Batch, Ease, FrameScrubber, FrameSeek, Playback, Result, Sample, Scrub, ScrollTrigger,
    ScrubbedTimeline, Stage, Stagger, StaggerFrom, TargetSnapshot, Timeline, ToggleAction,
    ToggledTimeline, TriggerEdge, Tween, lerp,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::beans::{self, BeanParticle};
use crate::glyphs::STEAM_FRAMES;
use crate::layout::{PageLayout, STREAM_MAX, Section};
use crate::magnetic::{MagneticCard, hover_enabled};

pub(crate) const HEADER: &str = "header";
pub(crate) const TITLE: &str = "title";
pub(crate) const TAGLINE: &str = "tagline";
pub(crate) const ROAST_BEANS: &str = "r-beans";
pub(crate) const STREAM: &str = "stream";
pub(crate) const LIQUID: &str = "liquid";
pub(crate) const STEAM: &str = "steam";
pub(crate) const FLOOR_BEANS: &str = "floor-beans";
pub(crate) const ORIGINS_BG: &str = "origins-bg";
pub(crate) const FORE_LEAF: &str = "fore-leaf";
pub(crate) const ORIGINS_TEXT: &str = "origins-text";
pub(crate) const MENU_HEADER: &str = "menu-header";

/// Beans dropped into the machine hopper.
const ROAST_BEAN_COUNT: usize = 6;

/// Origins copy, revealed line by line.
pub const ORIGINS_LINES: [&str; 3] = [
    "From the hills of Huila",
    "Hand-picked cherries, sun-dried and slow roasted in small batches.",
    "Meet the growers ->",
];

/// Menu cards: name and price.
pub const MENU_ITEMS: [(&str, &str); 3] = [
    ("Espresso", "3.20"),
    ("Flat White", "4.10"),
    ("Cold Brew", "4.50"),
];

/// Card state before its batch reveal.
const CARD_HIDDEN_Y: f32 = 100.0;

/// Everything a page build depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    pub viewport: Viewport,
    pub config: Config,
    pub seed: u64,
}

impl PageContext {
    /// Context for a viewport; the seed comes from the config or is random.
    pub fn new(viewport: Viewport, config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            viewport,
            config,
            seed,
        }
    }

    pub fn device(&self) -> DeviceClass {
        self.config.device_class(self.viewport)
    }

    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

/// The steaming-cup frame sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteamCup {
    frame: usize,
}

impl SteamCup {
    pub fn frame(&self) -> usize {
        self.frame
    }
}

impl FrameSeek for SteamCup {
    fn total_frames(&self) -> usize {
        STEAM_FRAMES.len()
    }

    fn seek(&mut self, frame: usize) {
        self.frame = frame.min(STEAM_FRAMES.len() - 1);
    }
}

/// One floor bean as drawn: its resting rectangle in the process section and
/// its animated properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeanView {
    pub rect: Rect,
    pub props: PropertySet,
    pub z_index: u8,
}

/// One menu card as drawn, in viewport px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardView {
    pub rect: Rect,
    pub reveal: PropertySet,
    pub image: PropertySet,
    pub number: PropertySet,
}

/// Everything the renderer needs for one frame. Section tops are viewport px.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub scroll: f32,
    pub hero_top: f32,
    pub hero: Sample,
    pub process_top: f32,
    pub brew: Sample,
    pub brew_progress: f32,
    pub floor: Vec<BeanView>,
    pub steam_frame: usize,
    pub origins_top: f32,
    pub origins_bg: PropertySet,
    pub fore_leaf: PropertySet,
    pub origins_text: Vec<PropertySet>,
    pub menu_top: f32,
    pub menu_header: PropertySet,
    pub cards: Vec<CardView>,
    pub footer_top: f32,
}

/// First target of a group, or the defaults when the group is absent.
pub fn first(sample: &Sample, group: &str) -> PropertySet {
    sample
        .get(group)
        .and_then(|targets| targets.first())
        .copied()
        .unwrap_or_default()
}

/// Combine a floor bean's rain-in and brew-roll properties. The rain owns the
/// fall offset and visibility; the roll owns everything else.
pub fn compose_floor(rain: PropertySet, roll: PropertySet) -> PropertySet {
    PropertySet {
        y: rain.y + roll.y,
        opacity: rain.opacity * roll.opacity,
        ..roll
    }
}

/// The landing page with all of its animation state.
#[derive(Debug)]
pub struct Page {
    layout: PageLayout,
    hover: bool,
    beans: Vec<BeanParticle>,
    hero: Timeline,
    hero_playback: Playback,
    rain: ToggledTimeline,
    brew: ScrubbedTimeline,
    steam_cup: SteamCup,
    steam_scrubber: FrameScrubber,
    origins_bg: ScrubbedTimeline,
    fore_leaf: ScrubbedTimeline,
    origins_text: ToggledTimeline,
    menu_header: ToggledTimeline,
    cards: Batch,
    magnetic: Vec<MagneticCard>,
    pointer: Option<Point>,
    scroll: f32,
    now: f32,
}

impl Page {
    /// Lay out the page for the context's viewport, build every timeline and
    /// bind the triggers at `scroll`.
    pub fn build(ctx: &PageContext, scroll: f32) -> Result<Self> {
        let mut page = Self::assemble(ctx)?;
        page.bind(scroll);
        Ok(page)
    }

    /// Build the page for a new viewport at the same relative scroll
    /// position. Animations that already ran on `earlier` stay finished.
    pub fn rebuild(ctx: &PageContext, earlier: &Page) -> Result<Self> {
        let mut page = Self::assemble(ctx)?;
        page.now = earlier.now;
        page.hero_playback = earlier.hero_playback;
        page.pointer = earlier.pointer;
        page.bind(earlier.scroll_fraction() * page.max_scroll());

        page.rain.carry_over(&earlier.rain);
        page.origins_text.carry_over(&earlier.origins_text);
        page.menu_header.carry_over(&earlier.menu_header);
        page.cards.carry_over(&earlier.cards);
        Ok(page)
    }

    fn assemble(ctx: &PageContext) -> Result<Self> {
        let vp = ctx.viewport;
        let device = ctx.device();
        let pin_length = ctx.config.pin_length(device);
        let layout = PageLayout::new(vp, device, pin_length, MENU_ITEMS.len());

        let mut rng = ctx.rng();
        let count = beans::bean_count(vp, &ctx.config);
        let mut beans = beans::generate_field(count, device, &mut rng);
        // Index order follows the floor left to right, so a centered stagger
        // sinks the middle of the floor first.
        beans.sort_by(|a, b| a.left_pct.total_cmp(&b.left_pct));

        let hero = hero_timeline(&layout)?;
        let mut hero_playback = Playback::new(hero.duration());
        hero_playback.apply(ToggleAction::Play);

        let rain = rain_timeline(&layout, &beans, ctx.seed)?;
        let brew = brew_timeline(&layout, &beans, &ctx.config)?;
        let (origins_bg, fore_leaf) = origins_parallax(&layout)?;
        let origins_text = origins_text_reveal(&layout)?;
        let menu_header = menu_header_reveal(&layout)?;

        let card_edge: TriggerEdge = "top 85%".parse()?;
        let starts = (0..layout.cards.len())
            .filter_map(|i| layout.card_on_page(i))
            .map(|rect| card_edge.resolve(rect, vp, 0.0))
            .collect();
        let cards = Batch::new(starts, 0.2, 1.2, "power3.out".parse()?);
        let magnetic = (0..layout.cards.len())
            .filter_map(|i| layout.card_on_page(i))
            .map(MagneticCard::new)
            .collect();

        info!(
            ?device,
            beans = beans.len(),
            page_height = layout.page_height(),
            pin_length,
            seed = ctx.seed,
            "page built"
        );

        Ok(Self {
            hover: hover_enabled(vp, ctx.config.mobile_breakpoint),
            layout,
            beans,
            hero,
            hero_playback,
            rain,
            brew,
            steam_cup: SteamCup::default(),
            steam_scrubber: FrameScrubber::new(),
            origins_bg,
            fore_leaf,
            origins_text,
            menu_header,
            cards,
            magnetic,
            pointer: None,
            scroll: 0.0,
            now: 0.0,
        })
    }

    fn bind(&mut self, scroll: f32) {
        let scroll = scroll.clamp(0.0, self.layout.max_scroll());
        self.scroll = scroll;
        self.rain.bind(scroll);
        self.brew.bind(scroll);
        self.origins_bg.bind(scroll);
        self.fore_leaf.bind(scroll);
        self.origins_text.bind(scroll);
        self.menu_header.bind(scroll);
        self.cards.update(scroll, self.now);
        self.steam_scrubber.scrub(&mut self.steam_cup, self.brew.progress());
        self.place_cards();
    }

    /// Move the hover cards to their on-screen rectangles for the current scroll.
    fn place_cards(&mut self) {
        for (i, card) in self.magnetic.iter_mut().enumerate() {
            if let Some(rect) = self.layout.card_on_page(i) {
                card.set_rect(rect.offset(0.0, -self.scroll), self.pointer, self.now);
            }
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn beans(&self) -> &[BeanParticle] {
        &self.beans
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn max_scroll(&self) -> f32 {
        self.layout.max_scroll()
    }

    /// Scroll position as a fraction of the scrollable height.
    pub fn scroll_fraction(&self) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 { 0.0 } else { self.scroll / max }
    }

    pub fn brew_progress(&self) -> f32 {
        self.brew.progress()
    }

    /// Advance to a new scroll offset after `dt` seconds.
    pub fn update(&mut self, scroll: f32, dt: f32) {
        let scroll = scroll.clamp(0.0, self.layout.max_scroll());
        self.scroll = scroll;
        self.now += dt;

        self.hero_playback.tick(dt);

        self.rain.update(scroll);
        self.rain.tick(dt);

        self.brew.update(scroll, dt);
        self.steam_scrubber.scrub(&mut self.steam_cup, self.brew.progress());

        self.origins_bg.update(scroll, dt);
        self.fore_leaf.update(scroll, dt);
        self.origins_text.update(scroll);
        self.origins_text.tick(dt);
        self.menu_header.update(scroll);
        self.menu_header.tick(dt);

        self.cards.update(scroll, self.now);
        self.place_cards();
    }

    /// Pointer moved to a viewport position.
    pub fn pointer_move(&mut self, pointer: Point) {
        if !self.hover {
            return;
        }
        self.pointer = Some(pointer);
        for card in &mut self.magnetic {
            card.pointer_move(pointer, self.now);
        }
    }

    /// Snapshot of every animated property at the current state. Pure.
    pub fn view(&self) -> PageView {
        let scroll = self.scroll;
        let brew = self.brew.sample();
        let rain = self.rain.sample();

        let floor = self
            .beans
            .iter()
            .enumerate()
            .map(|(i, bean)| {
                let rain = rain
                    .get(FLOOR_BEANS)
                    .and_then(|t| t.get(i))
                    .copied()
                    .unwrap_or_default();
                let roll = brew
                    .get(FLOOR_BEANS)
                    .and_then(|t| t.get(i))
                    .copied()
                    .unwrap_or_else(|| bean.resting());
                BeanView {
                    rect: bean.rect(self.layout.rig.floor),
                    props: compose_floor(rain, roll),
                    z_index: bean.z_index,
                }
            })
            .collect();

        let cards = self
            .magnetic
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let p = self.cards.progress(i, self.now);
                let (image, number) = card.sample(self.now);
                CardView {
                    rect: card.rect(),
                    reveal: PropertySet {
                        y: lerp(CARD_HIDDEN_Y, 0.0, p),
                        opacity: p,
                        ..PropertySet::default()
                    },
                    image,
                    number,
                }
            })
            .collect();

        PageView {
            scroll,
            hero_top: self.layout.viewport_top(Section::Hero, scroll),
            hero: self.hero.sample(self.hero_playback.time()),
            process_top: self.layout.viewport_top(Section::Process, scroll),
            brew_progress: self.brew.progress(),
            floor,
            steam_frame: self.steam_cup.frame(),
            origins_top: self.layout.viewport_top(Section::Origins, scroll),
            origins_bg: first(&self.origins_bg.sample(), ORIGINS_BG),
            fore_leaf: first(&self.fore_leaf.sample(), FORE_LEAF),
            origins_text: self
                .origins_text
                .sample()
                .remove(ORIGINS_TEXT)
                .unwrap_or_default(),
            menu_top: self.layout.viewport_top(Section::Menu, scroll),
            menu_header: first(&self.menu_header.sample(), MENU_HEADER),
            cards,
            footer_top: self.layout.viewport_top(Section::Footer, scroll),
            brew,
        }
    }
}

/// Position of a hero element, relative to the section top.
pub fn hero_rect(layout: &PageLayout, group: &str) -> Rect {
    let w = layout.viewport.width;
    let title_y = (layout.hero.height * 0.4).floor();
    match group {
        HEADER => Rect::new(0.0, 16.0, w, 16.0),
        TITLE => Rect::new(0.0, title_y, w, 16.0),
        _ => Rect::new(0.0, title_y + 48.0, w, 16.0),
    }
}

fn hero_timeline(layout: &PageLayout) -> Result<Timeline> {
    let one = |group: &str| {
        vec![TargetSnapshot::new(
            hero_rect(layout, group),
            PropertySet::default(),
        )]
    };
    let stage = Stage::new()
        .with_group(HEADER, one(HEADER))
        .with_group(TITLE, one(TITLE))
        .with_group(TAGLINE, one(TAGLINE));
    Ok(Timeline::build(
        &[
            Tween::from(HEADER)
                .start_at(Property::Y, -50.0)
                .start_at(Property::Opacity, 0.0)
                .duration(1.0),
            Tween::from(TITLE)
                .start_at(Property::Y, 100.0)
                .start_at(Property::Opacity, 0.0)
                .duration(1.0)
                .at("-=0.5".parse()?),
            Tween::from(TAGLINE)
                .start_at(Property::Y, 20.0)
                .start_at(Property::Opacity, 0.0)
                .duration(0.8)
                .at("-=0.5".parse()?),
        ],
        &stage,
    ))
}

fn floor_snapshots(
    layout: &PageLayout,
    beans: &[BeanParticle],
    base: impl Fn(&BeanParticle) -> PropertySet,
) -> Vec<TargetSnapshot> {
    beans
        .iter()
        .map(|bean| TargetSnapshot::new(bean.rect(layout.rig.floor), base(bean)))
        .collect()
}

fn rain_timeline(
    layout: &PageLayout,
    beans: &[BeanParticle],
    seed: u64,
) -> Result<ToggledTimeline> {
    let hidden = PropertySet::default().with(Property::Opacity, 0.0);
    let stage =
        Stage::new().with_group(FLOOR_BEANS, floor_snapshots(layout, beans, |_| hidden));
    let timeline = Timeline::build(
        &[Tween::from_to(FLOOR_BEANS)
            .start_at(Property::Y, -1.5 * layout.viewport.height)
            .start_at(Property::Opacity, 1.0)
            .set(Property::Y, 0.0)
            .set(Property::Opacity, 1.0)
            .duration(1.2)
            .ease("bounce.out".parse()?)
            .stagger(Stagger::amount(1.0).from(StaggerFrom::Random(seed)))],
        &stage,
    );
    let trigger =
        ScrollTrigger::from_edges(layout.process, layout.viewport, &"top 60%".parse()?, None)
            .once(true);
    Ok(ToggledTimeline::new(trigger, timeline))
}

/// Position of a hopper bean, relative to the process section top.
pub fn roast_bean_rect(layout: &PageLayout, index: usize) -> Rect {
    let offset = index as f32 - ROAST_BEAN_COUNT as f32 / 2.0;
    Rect::new(
        layout.viewport.center_x() + offset * 16.0,
        layout.rig.machine.y - 16.0,
        8.0,
        16.0,
    )
}

fn brew_timeline(
    layout: &PageLayout,
    beans: &[BeanParticle],
    config: &Config,
) -> Result<ScrubbedTimeline> {
    let rig = layout.rig;
    let center_x = layout.viewport.center_x();

    let roast_beans = (0..ROAST_BEAN_COUNT)
        .map(|i| {
            let base = PropertySet::default()
                .with(Property::Opacity, 0.0)
                .with(Property::Rotation, i as f32 * 30.0);
            TargetSnapshot::new(roast_bean_rect(layout, i), base)
        })
        .collect();
    let stream = vec![TargetSnapshot::new(
        Rect::new(center_x - 4.0, rig.stream_top, 8.0, 0.0),
        PropertySet::default(),
    )];
    let liquid = vec![TargetSnapshot::new(rig.cup, PropertySet::default())];
    let steam = vec![TargetSnapshot::new(
        rig.cup.offset(0.0, -32.0),
        PropertySet::default().with(Property::Opacity, 0.0),
    )];

    let stage = Stage::new()
        .with_group(ROAST_BEANS, roast_beans)
        .with_group(STREAM, stream)
        .with_group(LIQUID, liquid)
        .with_group(STEAM, steam)
        .with_group(FLOOR_BEANS, floor_snapshots(layout, beans, BeanParticle::resting));

    let focal = Point::new(center_x, rig.floor.bottom());
    let timeline = Timeline::build(
        &[
            Tween::to(ROAST_BEANS)
                .set(Property::Y, 280.0)
                .set(Property::Rotation, 360.0)
                .set(Property::Opacity, 1.0)
                .ease("power1.in".parse()?)
                .stagger(Stagger::each(0.1))
                .duration(1.5),
            Tween::to(ROAST_BEANS)
                .set(Property::Opacity, 0.0)
                .set(Property::Scale, 0.0)
                .duration(0.3)
                .stagger(Stagger::each(0.1))
                .at("-=1.2".parse()?),
            Tween::to(STREAM)
                .set(Property::Height, STREAM_MAX)
                .duration(2.0)
                .ease(Ease::None),
            Tween::to(LIQUID)
                .set(Property::Height, 85.0)
                .duration(3.0)
                .ease(Ease::None)
                .at("<0.5".parse()?),
            Tween::to(STEAM)
                .set(Property::Opacity, 0.8)
                .set(Property::Y, -50.0)
                .duration(2.0)
                .at("<".parse()?),
            Tween::to(STREAM)
                .set(Property::Height, 0.0)
                .set(Property::Opacity, 0.0)
                .duration(0.5),
            Tween::to(FLOOR_BEANS)
                .set_each(
                    &[
                        Property::X,
                        Property::Y,
                        Property::Rotation,
                        Property::Scale,
                        Property::Opacity,
                    ],
                    move |_, snapshot| beans::roll_target(snapshot, focal),
                )
                .duration(8.0)
                .ease(Ease::None)
                .stagger(Stagger::amount(5.0).from(StaggerFrom::Center))
                .at("+=0.1".parse()?),
        ],
        &stage,
    );

    let pin_end: TriggerEdge = format!("+={}", layout.pin.spacing()).parse()?;
    let trigger = ScrollTrigger::from_edges(
        layout.process,
        layout.viewport,
        &"top top".parse()?,
        Some(&pin_end),
    );
    let scrub = if config.scrub_smoothing > 0.0 {
        Scrub::Smoothed(config.scrub_smoothing)
    } else {
        Scrub::Immediate
    };
    Ok(ScrubbedTimeline::new(trigger, timeline, scrub))
}

fn origins_parallax(layout: &PageLayout) -> Result<(ScrubbedTimeline, ScrubbedTimeline)> {
    let start: TriggerEdge = "top bottom".parse()?;
    let end: TriggerEdge = "bottom top".parse()?;
    let trigger = ScrollTrigger::from_edges(layout.origins, layout.viewport, &start, Some(&end));
    let snapshot = vec![TargetSnapshot::new(layout.origins, PropertySet::default())];

    let bg = Timeline::build(
        &[Tween::to(ORIGINS_BG)
            .set(Property::Y, 150.0)
            .ease(Ease::None)
            .duration(1.0)],
        &Stage::new().with_group(ORIGINS_BG, snapshot.clone()),
    );
    let leaf = Timeline::build(
        &[Tween::to(FORE_LEAF)
            .set(Property::Y, -200.0)
            .set(Property::Rotation, 15.0)
            .ease(Ease::None)
            .duration(1.0)],
        &Stage::new().with_group(FORE_LEAF, snapshot),
    );
    Ok((
        ScrubbedTimeline::new(trigger.clone(), bg, Scrub::Smoothed(1.0)),
        ScrubbedTimeline::new(trigger, leaf, Scrub::Smoothed(1.5)),
    ))
}

/// Position of an origins text line, relative to the section top.
pub fn origins_line_rect(layout: &PageLayout, index: usize) -> Rect {
    let top = (layout.origins.height * 0.3).floor() + index as f32 * 32.0;
    Rect::new(48.0, top, layout.viewport.width - 96.0, 16.0)
}

fn origins_text_reveal(layout: &PageLayout) -> Result<ToggledTimeline> {
    let hidden = PropertySet::default()
        .with(Property::Y, 50.0)
        .with(Property::Opacity, 0.0);
    let targets = (0..ORIGINS_LINES.len())
        .map(|i| TargetSnapshot::new(origins_line_rect(layout, i), hidden))
        .collect();
    let timeline = Timeline::build(
        &[Tween::to(ORIGINS_TEXT)
            .set(Property::Y, 0.0)
            .set(Property::Opacity, 1.0)
            .duration(1.0)
            .stagger(Stagger::each(0.2))
            .ease("power3.out".parse()?)],
        &Stage::new().with_group(ORIGINS_TEXT, targets),
    );
    let trigger =
        ScrollTrigger::from_edges(layout.origins, layout.viewport, &"top 60%".parse()?, None)
            .toggle_actions("play none none reverse".parse()?);
    Ok(ToggledTimeline::new(trigger, timeline))
}

fn menu_header_reveal(layout: &PageLayout) -> Result<ToggledTimeline> {
    let target = vec![TargetSnapshot::new(
        Rect::new(0.0, 32.0, layout.viewport.width, 16.0),
        PropertySet::default(),
    )];
    let timeline = Timeline::build(
        &[Tween::from(MENU_HEADER)
            .start_at(Property::Y, 50.0)
            .start_at(Property::Opacity, 0.0)
            .duration(1.0)
            .ease("power3.out".parse()?)],
        &Stage::new().with_group(MENU_HEADER, target),
    );
    let trigger = ScrollTrigger::from_edges(layout.menu, layout.viewport, &"top 70%".parse()?, None)
        .toggle_actions("play none none reverse".parse()?);
    Ok(ToggledTimeline::new(trigger, timeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnetic::image_rest;

    fn context(width: f32, height: f32) -> PageContext {
        let config = Config {
            seed: Some(7),
            ..Config::default()
        };
        PageContext::new(Viewport::new(width, height), config)
    }

    fn desktop() -> Page {
        Page::build(&context(1024.0, 640.0), 0.0).unwrap()
    }

    #[test]
    fn test_bean_count_follows_device() {
        assert_eq!(desktop().beans().len(), 180);
        let mobile = Page::build(&context(480.0, 640.0), 0.0).unwrap();
        assert_eq!(mobile.beans().len(), 50);
        assert_eq!(mobile.layout().pin.spacing(), 3000.0);
    }

    #[test]
    fn test_same_seed_same_page() {
        assert_eq!(desktop().beans(), desktop().beans());
        assert_eq!(desktop().view(), desktop().view());
    }

    #[test]
    fn test_beans_hidden_until_rain_triggers() {
        let mut page = desktop();
        page.update(0.0, 5.0);
        assert!(page.view().floor.iter().all(|b| b.props.opacity == 0.0));

        // Process top is at 640; the rain starts when it reaches 60% down.
        page.update(300.0, 0.0);
        page.update(300.0, 5.0);
        for bean in page.view().floor {
            assert_eq!(bean.props.opacity, 1.0);
            assert!(bean.props.y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_hero_intro_plays_on_load() {
        let mut page = desktop();
        let start = page.view();
        assert_eq!(first(&start.hero, HEADER).opacity, 0.0);
        assert_eq!(first(&start.hero, TITLE).y, 100.0);

        page.update(0.0, 3.0);
        let done = page.view();
        for group in [HEADER, TITLE, TAGLINE] {
            assert_eq!(first(&done.hero, group), PropertySet::default());
        }
    }

    #[test]
    fn test_floor_drains_into_the_middle_by_pin_end() {
        let mut page = desktop();
        let (_, pin_end) = page.layout().pin.range();
        page.update(pin_end, 10.0);
        let view = page.view();
        assert_eq!(view.process_top, 0.0);
        assert_eq!(view.brew_progress, 1.0);
        assert_eq!(view.steam_frame, STEAM_FRAMES.len() - 1);
        let focal = page.layout().viewport.center_x();
        for bean in &view.floor {
            assert!(bean.props.opacity < 1e-3);
            assert!((bean.rect.center().x + bean.props.x - focal).abs() < 1e-2);
            assert!((bean.props.y - beans::DRAIN_DROP).abs() < 1e-3);
        }
        let liquid = first(&view.brew, LIQUID);
        assert_eq!(liquid.height, 85.0);
    }

    #[test]
    fn test_center_of_floor_sinks_first() {
        let mut page = desktop();
        let (start, end) = page.layout().pin.range();
        page.update(start + (end - start) * 0.75, 10.0);
        let floor = page.view().floor;
        let mid = floor.len() / 2;
        assert!(floor[mid].props.scale < floor[0].props.scale);
        assert!(floor[mid].props.scale < floor[floor.len() - 1].props.scale);
    }

    #[test]
    fn test_view_is_idempotent_per_scroll() {
        let mut page = desktop();
        page.update(2400.0, 10.0);
        assert_eq!(page.view(), page.view());
    }

    #[test]
    fn test_origins_text_reveals_and_reverses() {
        let mut page = desktop();
        let origins = page.layout().origins.y;
        page.update(origins - 640.0 * 0.6 + 10.0, 0.0);
        page.update(origins - 640.0 * 0.6 + 10.0, 5.0);
        for line in page.view().origins_text {
            assert_eq!((line.opacity, line.y), (1.0, 0.0));
        }
        page.update(0.0, 0.0);
        page.update(0.0, 5.0);
        for line in page.view().origins_text {
            assert_eq!((line.opacity, line.y), (0.0, 50.0));
        }
    }

    #[test]
    fn test_menu_cards_reveal_in_a_batch() {
        let mut page = desktop();
        assert!(page.view().cards.iter().all(|c| c.reveal.opacity == 0.0));
        page.update(page.max_scroll(), 0.0);
        page.update(page.max_scroll(), 5.0);
        for card in page.view().cards {
            assert_eq!(card.reveal.opacity, 1.0);
            assert_eq!(card.reveal.y, 0.0);
        }
    }

    #[test]
    fn test_hover_only_on_wide_viewports() {
        let mut page = desktop();
        page.update(page.max_scroll(), 0.0);
        let card = page.view().cards[0].rect;
        page.pointer_move(Point::new(card.right() - 1.0, card.center().y));
        page.update(page.max_scroll(), 1.0);
        assert!(page.view().cards[0].image.x > 0.0);

        let mut narrow = Page::build(&context(480.0, 640.0), 0.0).unwrap();
        narrow.update(narrow.max_scroll(), 0.0);
        let card = narrow.view().cards[0].rect;
        narrow.pointer_move(Point::new(card.right() - 1.0, card.center().y));
        narrow.update(narrow.max_scroll(), 1.0);
        assert_eq!(narrow.view().cards[0].image.x, 0.0);
    }

    #[test]
    fn test_scrolling_card_away_from_pointer_releases_it() {
        let mut page = desktop();
        let bottom = page.max_scroll();
        page.update(bottom, 0.0);
        let card = page.view().cards[0].rect;
        page.pointer_move(Point::new(card.right() - 1.0, card.center().y));
        page.update(bottom, 1.0);
        assert!(page.view().cards[0].image.x > 0.0);

        page.update(bottom - 600.0, 0.0);
        page.update(bottom - 600.0, 2.0);
        let view = page.view();
        assert_eq!(view.cards[0].image, image_rest());
        assert_eq!(view.cards[0].number, PropertySet::default());
    }

    #[test]
    fn test_hover_follows_configured_breakpoint() {
        let config = Config {
            seed: Some(7),
            mobile_breakpoint: 1100.0,
            ..Config::default()
        };
        let ctx = PageContext::new(Viewport::new(1024.0, 640.0), config);
        let mut page = Page::build(&ctx, 0.0).unwrap();
        page.update(page.max_scroll(), 0.0);
        let card = page.view().cards[0].rect;
        page.pointer_move(Point::new(card.right() - 1.0, card.center().y));
        page.update(page.max_scroll(), 1.0);
        assert_eq!(page.view().cards[0].image, image_rest());
    }

    #[test]
    fn test_rebuild_does_not_replay_finished_animations() {
        let mut page = desktop();
        page.update(300.0, 0.0);
        page.update(300.0, 5.0);

        let rebuilt = Page::rebuild(&context(1280.0, 640.0), &page).unwrap();
        let view = rebuilt.view();
        assert_eq!(first(&view.hero, TITLE), PropertySet::default());
        for bean in view.floor {
            assert_eq!(bean.props.opacity, 1.0);
            assert!(bean.props.y.abs() < 1e-3);
        }

        page.update(page.max_scroll(), 0.0);
        page.update(page.max_scroll(), 5.0);
        let rebuilt = Page::rebuild(&context(1280.0, 640.0), &page).unwrap();
        assert!((rebuilt.scroll_fraction() - 1.0).abs() < 1e-4);
        for card in rebuilt.view().cards {
            assert_eq!(card.reveal.opacity, 1.0);
        }
    }

    #[test]
    fn test_compose_floor() {
        let rain = PropertySet::default()
            .with(Property::Y, -20.0)
            .with(Property::Opacity, 1.0);
        let roll = PropertySet {
            x: 30.0,
            y: 100.0,
            rotation: 90.0,
            scale: 0.5,
            opacity: 0.5,
            height: 0.0,
        };
        let out = compose_floor(rain, roll);
        assert_eq!(
            (out.x, out.y, out.rotation, out.scale, out.opacity),
            (30.0, 80.0, 90.0, 0.5, 0.5)
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut page = desktop();
        page.update(-50.0, 0.0);
        assert_eq!(page.scroll(), 0.0);
        page.update(1e9, 0.0);
        assert_eq!(page.scroll(), page.max_scroll());
        assert_eq!(page.scroll_fraction(), 1.0);
    }
}
