use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use ringpager_core::{Displayable, SlotPosition, SlotView};

use crate::app::App;
use crate::theme::Theme;
use crate::viewport::StripViewport;

/// The three slots side by side, scrolled by the current swipe offset
pub struct PagerStripWidget;

impl PagerStripWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey1))
            .title(format!(
                " {} / {} ",
                app.config.pager.strategy, app.config.pager.snapshot_mode
            ))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.is_empty() {
            return;
        }

        let extent = StripViewport::extent_for_cells(inner.width, inner.height);
        let viewport = app.viewport();
        let buf = frame.buffer_mut();

        for position in SlotPosition::ALL {
            let offset = viewport.slot_offset(position, inner.width as u32);
            if offset <= -(inner.width as i32) || offset >= inner.width as i32 {
                continue;
            }

            match app.pager.displayable_for_slot(position) {
                SlotView::Content(page) => {
                    if let Some(image) = page.rasterize(Some(extent)) {
                        blit_halfblocks(buf, inner, &image, offset);
                    }
                    let style = Style::default().fg(theme.bg0).bg(theme.fg0);
                    draw_label(buf, inner, offset, page.title(), style);
                }
                SlotView::Dummy(snapshot) => {
                    let image = if snapshot.image().dimensions() == (extent.width, extent.height) {
                        snapshot.image().clone()
                    } else {
                        image::imageops::resize(
                            snapshot.image(),
                            extent.width,
                            extent.height,
                            FilterType::Triangle,
                        )
                    };
                    blit_halfblocks(buf, inner, &image, offset);
                    let label = format!("snapshot of page {}", snapshot.page() + 1);
                    draw_label(buf, inner, offset, &label, dummy_style(theme));
                }
                SlotView::Empty => {
                    draw_label(buf, inner, offset, "empty", Style::default().fg(theme.grey1));
                }
            }
        }
    }
}

fn dummy_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.bg0)
        .bg(theme.dummy)
        .add_modifier(Modifier::ITALIC)
}

/// Draw `image` (sized to the area in halfblock pixels) shifted right by
/// `offset` columns, clipped to `area`.
fn blit_halfblocks(buf: &mut Buffer, area: Rect, image: &RgbaImage, offset: i32) {
    let (width, height) = image.dimensions();
    for row in 0..area.height {
        let y = row as u32 * 2;
        if y >= height {
            break;
        }
        for col in 0..area.width {
            let x = col as i32 - offset;
            if x < 0 || x as u32 >= width {
                continue;
            }
            let top = image.get_pixel(x as u32, y);
            let bottom = if y + 1 < height {
                image.get_pixel(x as u32, y + 1)
            } else {
                top
            };
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol("▀")
                    .set_fg(Color::Rgb(top[0], top[1], top[2]))
                    .set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
            }
        }
    }
}

/// Centered one-line label inside the slot starting at `offset`
fn draw_label(buf: &mut Buffer, area: Rect, offset: i32, text: &str, style: Style) {
    let text = format!(" {} ", text);
    let len = text.chars().count() as i32;
    let start = offset + (area.width as i32 - len) / 2;
    let row = area.y + area.height / 2;

    for (i, ch) in text.chars().enumerate() {
        let col = start + i as i32;
        if col < 0 || col >= area.width as i32 {
            continue;
        }
        if let Some(cell) = buf.cell_mut((area.x + col as u16, row)) {
            cell.set_char(ch).set_style(style);
        }
    }
}
