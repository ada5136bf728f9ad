//! Drawing the page view onto a terminal frame.

use crema_core::{CELL_HEIGHT_PX, CELL_WIDTH_PX, PropertySet, RoastTheme};
use ratatui::{Frame, style::Color, widgets::Paragraph};

use crate::canvas::Canvas;
use crate::color::{fade, origins_gradient};
use crate::glyphs::{
    CUP, FORE_LEAF, LEAF_CHARS, LIQUID_CHAR, MACHINE, STEAM_FRAMES, STREAM_CHAR, bean_glyph,
};
use crate::layout::PageLayout;
use crate::page::{
    HEADER, LIQUID, MENU_ITEMS, ORIGINS_LINES, Page, PageView, ROAST_BEANS, STEAM, STREAM,
    TAGLINE, TITLE, first, hero_rect, origins_line_rect, roast_bean_rect,
};

const TITLE_TEXT: &str = "Brewed by the scroll";
const TAGLINE_TEXT: &str = "Slow roasted. Poured as you read.  v";
const NAV_TEXT: &str = "Process   Origins   Menu";
const FOOTER_LINES: [&str; 2] = ["crema roastery  /  open daily 7-18", "(c) crema coffee co."];

/// Render the page and a status line filling the frame.
pub fn render(frame: &mut Frame, page: &Page, theme: RoastTheme, status: &str) {
    let area = frame.area();
    let mut canvas = paint(page, theme, area.width, area.height);
    let status_y = area.height.saturating_sub(1) as f32 * CELL_HEIGHT_PX;
    canvas.text(CELL_WIDTH_PX, status_y, status, fade(theme.text(), 0.6));
    frame.render_widget(Paragraph::new(canvas.into_lines()), area);
}

/// Paint the current page view onto a fresh canvas.
pub fn paint(page: &Page, theme: RoastTheme, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    let view = page.view();
    let layout = page.layout();

    draw_origins(&mut canvas, &view, layout, theme);
    draw_hero(&mut canvas, &view, layout, theme);
    draw_process(&mut canvas, &view, layout, theme);
    draw_menu(&mut canvas, &view, layout, theme);
    draw_footer(&mut canvas, &view, layout, theme);
    canvas
}

fn draw_lines(canvas: &mut Canvas, x: f32, y: f32, lines: &[&str], color: Color) {
    for (i, line) in lines.iter().enumerate() {
        canvas.text(x, y + i as f32 * CELL_HEIGHT_PX, line, color);
    }
}

fn art_width(lines: &[&str]) -> f32 {
    lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * CELL_WIDTH_PX
}

fn draw_hero(canvas: &mut Canvas, view: &PageView, layout: &PageLayout, theme: RoastTheme) {
    let top = view.hero_top;
    let center = layout.viewport.center_x();

    let header = first(&view.hero, HEADER);
    let y = top + hero_rect(layout, HEADER).y + header.y;
    canvas.text(16.0, y, "CREMA", fade(theme.accent(), header.opacity));
    let nav_x = layout.viewport.width - 16.0 - NAV_TEXT.len() as f32 * CELL_WIDTH_PX;
    canvas.text(nav_x, y, NAV_TEXT, fade(theme.text(), header.opacity));

    let title = first(&view.hero, TITLE);
    let y = top + hero_rect(layout, TITLE).y + title.y;
    canvas.text_centered(center, y, TITLE_TEXT, fade(theme.accent(), title.opacity));

    let tagline = first(&view.hero, TAGLINE);
    let y = top + hero_rect(layout, TAGLINE).y + tagline.y;
    canvas.text_centered(center, y, TAGLINE_TEXT, fade(theme.text(), tagline.opacity));
}

fn draw_process(canvas: &mut Canvas, view: &PageView, layout: &PageLayout, theme: RoastTheme) {
    let top = view.process_top;
    let rig = layout.rig;
    let center = layout.viewport.center_x();

    draw_lines(canvas, rig.machine.x, top + rig.machine.y, &MACHINE, theme.text());

    // Cup and liquid.
    let cup_y = top + rig.cup.y;
    draw_lines(canvas, rig.cup.x, cup_y, &CUP, theme.text());
    let liquid = first(&view.brew, LIQUID);
    let inner_rows = CUP.len() - 1;
    let filled = ((liquid.height / 100.0) * inner_rows as f32).round() as usize;
    for row in (inner_rows - filled.min(inner_rows))..inner_rows {
        for col in 1..9 {
            canvas.put(
                rig.cup.x + col as f32 * CELL_WIDTH_PX,
                cup_y + row as f32 * CELL_HEIGHT_PX,
                LIQUID_CHAR,
                theme.bean(),
            );
        }
    }

    // Stream from the spout, stopping at the cup rim.
    let stream = first(&view.brew, STREAM);
    if stream.is_visible() {
        let length = stream.height.min(rig.cup.y - rig.stream_top).max(0.0);
        let rows = (length / CELL_HEIGHT_PX).round() as usize;
        for row in 0..rows {
            let y = top + rig.stream_top + row as f32 * CELL_HEIGHT_PX;
            canvas.put(center, y, STREAM_CHAR, fade(theme.bean(), stream.opacity));
        }
    }

    // Steam above the cup, scrubbed frame by frame.
    let steam = first(&view.brew, STEAM);
    if steam.is_visible() {
        let frame = &STEAM_FRAMES[view.steam_frame.min(STEAM_FRAMES.len() - 1)];
        let y = cup_y - 2.0 * CELL_HEIGHT_PX + steam.y;
        draw_lines(canvas, rig.cup.x, y, frame, fade(theme.text(), steam.opacity));
    }

    // Hopper beans.
    if let Some(roast) = view.brew.get(ROAST_BEANS) {
        for (i, props) in roast.iter().enumerate() {
            let rect = roast_bean_rect(layout, i);
            draw_bean(canvas, rect.x, top + rect.y, props, theme);
        }
    }

    // Floor beans, low stacking order first.
    let mut floor: Vec<_> = view.floor.iter().collect();
    floor.sort_by_key(|b| b.z_index);
    for bean in floor {
        draw_bean(canvas, bean.rect.x, top + bean.rect.y, &bean.props, theme);
    }
}

fn draw_bean(canvas: &mut Canvas, x: f32, y: f32, props: &PropertySet, theme: RoastTheme) {
    if !props.is_visible() {
        return;
    }
    canvas.put(
        x + props.x,
        y + props.y,
        bean_glyph(props.rotation, props.scale),
        fade(theme.bean(), props.opacity),
    );
}

fn draw_origins(canvas: &mut Canvas, view: &PageView, layout: &PageLayout, theme: RoastTheme) {
    let top = view.origins_top;
    let rows = (layout.origins.height / CELL_HEIGHT_PX) as usize;
    let cols = (layout.viewport.width / CELL_WIDTH_PX) as usize;

    // Background layer drifts with the parallax offset.
    for row in 0..rows {
        let y = top + row as f32 * CELL_HEIGHT_PX + view.origins_bg.y;
        canvas.fill_row(y, origins_gradient(row as f32 / rows.max(1) as f32));
        for col in (0..cols).filter(|c| (c * 7 + row * 13) % 23 == 0) {
            let ch = LEAF_CHARS[(col + row) % LEAF_CHARS.len()];
            canvas.put(col as f32 * CELL_WIDTH_PX, y, ch, fade(theme.text(), 0.3));
        }
    }

    let leaf = view.fore_leaf;
    let leaf_x = layout.viewport.width - art_width(&FORE_LEAF) - 32.0 + leaf.rotation;
    let leaf_y = top + layout.origins.height * 0.6 + leaf.y;
    draw_lines(canvas, leaf_x, leaf_y, &FORE_LEAF, Color::Rgb(96, 140, 80));

    for (i, (line, props)) in ORIGINS_LINES.iter().zip(&view.origins_text).enumerate() {
        let rect = origins_line_rect(layout, i);
        let color = if i == 0 { theme.accent() } else { theme.text() };
        canvas.text(rect.x, top + rect.y + props.y, line, fade(color, props.opacity));
    }
}

fn draw_menu(canvas: &mut Canvas, view: &PageView, layout: &PageLayout, theme: RoastTheme) {
    let header = view.menu_header;
    canvas.text_centered(
        layout.viewport.center_x(),
        view.menu_top + 32.0 + header.y,
        "Our Menu",
        fade(theme.accent(), header.opacity),
    );

    for (i, (card, (name, price))) in view.cards.iter().zip(MENU_ITEMS).enumerate() {
        let opacity = card.reveal.opacity;
        if opacity <= 0.01 {
            continue;
        }
        let rect = card.rect.offset(0.0, card.reveal.y);
        let border = fade(theme.accent(), opacity * 0.6);
        let cols = (rect.width / CELL_WIDTH_PX) as usize;
        let rows = (rect.height / CELL_HEIGHT_PX) as usize;
        for col in 0..cols {
            let x = rect.x + col as f32 * CELL_WIDTH_PX;
            canvas.put(x, rect.y, '─', border);
            canvas.put(x, rect.y + (rows.max(1) - 1) as f32 * CELL_HEIGHT_PX, '─', border);
        }
        for row in 0..rows {
            let y = rect.y + row as f32 * CELL_HEIGHT_PX;
            canvas.put(rect.x, y, '│', border);
            canvas.put(rect.x + (cols.max(1) - 1) as f32 * CELL_WIDTH_PX, y, '│', border);
        }

        let number = format!("{:02}", i + 1);
        canvas.text(
            rect.x + 16.0 + card.number.x,
            rect.y + 16.0 + card.number.y,
            &number,
            fade(theme.text(), opacity * 0.4),
        );

        let image = card.image;
        let cup_x = rect.center().x - art_width(&CUP) / 2.0 + image.x + image.rotation;
        let cup_y = rect.y + rect.height / 2.0 + image.y;
        draw_lines(canvas, cup_x, cup_y, &CUP, fade(theme.text(), opacity));

        let name_y = rect.bottom() - 3.0 * CELL_HEIGHT_PX;
        canvas.text_centered(rect.center().x, name_y, name, fade(theme.accent(), opacity));
        canvas.text_centered(
            rect.center().x,
            name_y + CELL_HEIGHT_PX,
            price,
            fade(theme.text(), opacity),
        );
    }
}

fn draw_footer(canvas: &mut Canvas, view: &PageView, layout: &PageLayout, theme: RoastTheme) {
    let center = layout.viewport.center_x();
    for (i, line) in FOOTER_LINES.iter().enumerate() {
        let y = view.footer_top + (i + 2) as f32 * CELL_HEIGHT_PX;
        canvas.text_centered(center, y, line, fade(theme.text(), 0.7));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::BEAN_GLYPHS;
    use crate::page::PageContext;
    use crema_config::Config;
    use crema_core::Viewport;

    fn page(cols: u16, rows: u16) -> Page {
        let config = Config {
            seed: Some(3),
            ..Config::default()
        };
        Page::build(&PageContext::new(Viewport::from_cells(cols, rows), config), 0.0).unwrap()
    }

    fn contains(canvas: &Canvas, pred: impl Fn(char) -> bool) -> bool {
        (0..canvas.height())
            .any(|row| (0..canvas.width()).any(|col| canvas.char_at(col, row).is_some_and(&pred)))
    }

    #[test]
    fn test_hero_is_drawn_at_top() {
        let mut p = page(120, 40);
        p.update(0.0, 3.0);
        let canvas = paint(&p, RoastTheme::Medium, 120, 40);
        assert_eq!(canvas.char_at(2, 1), Some('C'));
        assert!(!contains(&canvas, |c| BEAN_GLYPHS.contains(&c)));
    }

    #[test]
    fn test_pinned_process_shows_machine_and_beans() {
        let mut p = page(120, 40);
        let start = p.layout().pin.range().0;
        p.update(start, 0.0);
        p.update(start, 5.0);
        let canvas = paint(&p, RoastTheme::Dark, 120, 40);
        assert!(contains(&canvas, |c| c == 'B'));
        assert!(contains(&canvas, |c| BEAN_GLYPHS.contains(&c)));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let mut p = page(20, 6);
        for scroll in [0.0, 500.0, 5000.0, 1e6] {
            p.update(scroll, 0.5);
            let canvas = paint(&p, RoastTheme::Light, 20, 6);
            assert_eq!(canvas.into_lines().len(), 6);
        }
        let canvas = paint(&p, RoastTheme::Light, 0, 0);
        assert!(canvas.into_lines().is_empty());
    }
}
