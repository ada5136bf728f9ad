//! Page layout in px: five stacked sections, with the process section pinned.

use crema_core::{CELL_HEIGHT_PX, CELL_WIDTH_PX, DeviceClass, Rect, Viewport};
use crema_motion::PinSpacer;

use crate::glyphs::{CUP, MACHINE};

/// Height of the strip at the bottom of the process section the beans rest in.
pub const FLOOR_HEIGHT: f32 = 48.0;
/// Longest the coffee stream gets, in px.
pub const STREAM_MAX: f32 = 180.0;
/// Offset of the machine below the process section top.
const MACHINE_TOP: f32 = 2.0 * CELL_HEIGHT_PX;

const CARD_GAP: f32 = 32.0;
const CARDS_TOP: f32 = 6.0 * CELL_HEIGHT_PX;
const CARD_HEIGHT_DESKTOP: f32 = 240.0;
const CARD_HEIGHT_MOBILE: f32 = 192.0;
const FOOTER_HEIGHT: f32 = 6.0 * CELL_HEIGHT_PX;

/// Sections from the top of the page down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Process,
    Origins,
    Menu,
    Footer,
}

/// Positions of the brewing props, relative to the process section top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrewRig {
    pub machine: Rect,
    /// Where the stream leaves the spout.
    pub stream_top: f32,
    pub cup: Rect,
    /// Beans rest at the bottom of this strip.
    pub floor: Rect,
}

impl BrewRig {
    fn new(viewport: Viewport, section_height: f32) -> Self {
        let machine_w = MACHINE[0].chars().count() as f32 * CELL_WIDTH_PX;
        let machine_h = MACHINE.len() as f32 * CELL_HEIGHT_PX;
        let machine = Rect::new(
            viewport.center_x() - machine_w / 2.0,
            MACHINE_TOP,
            machine_w,
            machine_h,
        );
        let stream_top = machine.bottom();

        let cup_w = CUP[0].chars().count() as f32 * CELL_WIDTH_PX;
        let cup_h = CUP.len() as f32 * CELL_HEIGHT_PX;
        let cup_top = (stream_top + STREAM_MAX)
            .min(section_height - FLOOR_HEIGHT - cup_h)
            .max(stream_top);
        let cup = Rect::new(viewport.center_x() - cup_w / 2.0, cup_top, cup_w, cup_h);

        let floor = Rect::new(
            0.0,
            section_height - FLOOR_HEIGHT,
            viewport.width,
            FLOOR_HEIGHT,
        );

        Self {
            machine,
            stream_top,
            cup,
            floor,
        }
    }
}

/// Natural page geometry for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub viewport: Viewport,
    pub device: DeviceClass,
    pub hero: Rect,
    pub process: Rect,
    pub origins: Rect,
    pub menu: Rect,
    pub footer: Rect,
    pub pin: PinSpacer,
    pub rig: BrewRig,
    /// Menu cards, relative to the menu section top.
    pub cards: Vec<Rect>,
}

impl PageLayout {
    pub fn new(viewport: Viewport, device: DeviceClass, pin_length: f32, card_count: usize) -> Self {
        let vh = viewport.height;
        let hero = Rect::new(0.0, 0.0, viewport.width, vh);
        let process = Rect::new(0.0, hero.bottom(), viewport.width, vh);
        let pin = PinSpacer::new(process.y, process.y, pin_length);

        let origins = Rect::new(0.0, process.bottom() + pin.spacing(), viewport.width, vh);

        let cards = card_rects(viewport, device, card_count);
        let cards_bottom = cards.iter().map(Rect::bottom).fold(CARDS_TOP, f32::max);
        let menu = Rect::new(
            0.0,
            origins.bottom(),
            viewport.width,
            (cards_bottom + CARD_GAP * 2.0).max(vh),
        );
        let footer = Rect::new(0.0, menu.bottom(), viewport.width, FOOTER_HEIGHT);

        Self {
            viewport,
            device,
            hero,
            process,
            origins,
            menu,
            footer,
            pin,
            rig: BrewRig::new(viewport, process.height),
            cards,
        }
    }

    pub fn page_height(&self) -> f32 {
        self.footer.bottom()
    }

    pub fn max_scroll(&self) -> f32 {
        (self.page_height() - self.viewport.height).max(0.0)
    }

    pub fn section(&self, section: Section) -> Rect {
        match section {
            Section::Hero => self.hero,
            Section::Process => self.process,
            Section::Origins => self.origins,
            Section::Menu => self.menu,
            Section::Footer => self.footer,
        }
    }

    /// Top of a section in viewport px at the given scroll offset.
    pub fn viewport_top(&self, section: Section, scroll: f32) -> f32 {
        match section {
            Section::Process => self.pin.viewport_top(scroll),
            other => self.section(other).y - scroll,
        }
    }

    /// Page rectangle of a menu card.
    pub fn card_on_page(&self, index: usize) -> Option<Rect> {
        self.cards.get(index).map(|c| c.offset(0.0, self.menu.y))
    }
}

fn card_rects(viewport: Viewport, device: DeviceClass, count: usize) -> Vec<Rect> {
    match device {
        DeviceClass::Desktop => {
            let columns = count.max(1) as f32;
            let width = ((viewport.width - CARD_GAP * (columns + 1.0)) / columns).max(0.0);
            (0..count)
                .map(|i| {
                    let x = CARD_GAP + i as f32 * (width + CARD_GAP);
                    Rect::new(x, CARDS_TOP, width, CARD_HEIGHT_DESKTOP)
                })
                .collect()
        }
        DeviceClass::Mobile => {
            let width = (viewport.width - CARD_GAP * 2.0).max(0.0);
            (0..count)
                .map(|i| {
                    let y = CARDS_TOP + i as f32 * (CARD_HEIGHT_MOBILE + CARD_GAP);
                    Rect::new(CARD_GAP, y, width, CARD_HEIGHT_MOBILE)
                })
                .collect()
        }
    }
}
