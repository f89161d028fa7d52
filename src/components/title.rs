//! Title image component
//!
//! Renders the decoded header image with half-block glyphs, caching the
//! downsampled cells for the last area size.

use crate::component::Component;
use crate::services::TitleImage;
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct TitleComponent {
    image: TitleImage,
    cache: Option<((u16, u16), Vec<Line<'static>>)>,
}

impl TitleComponent {
    pub fn new(image: TitleImage) -> Self {
        Self { image, cache: None }
    }

    fn lines_for(&mut self, width: u16, height: u16) -> &[Line<'static>] {
        let stale = self
            .cache
            .as_ref()
            .map(|(size, _)| *size != (width, height))
            .unwrap_or(true);
        if stale {
            let lines = build_lines(&self.image, width, height);
            self.cache = Some(((width, height), lines));
        }
        self.cache
            .as_ref()
            .map(|(_, lines)| lines.as_slice())
            .unwrap_or(&[])
    }
}

fn build_lines(image: &TitleImage, width: u16, height: u16) -> Vec<Line<'static>> {
    image
        .to_cells(width, height)
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(top, bottom)| {
                        Span::styled(
                            "▀",
                            Style::default()
                                .fg(Color::Rgb(top[0], top[1], top[2]))
                                .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

impl Component for TitleComponent {
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = self.lines_for(area.width, area.height).to_vec();
        let image_width = lines.first().map(|l| l.width() as u16).unwrap_or(0);
        let image_height = lines.len() as u16;

        // Centre inside the area
        let x = area.x + area.width.saturating_sub(image_width) / 2;
        let y = area.y + area.height.saturating_sub(image_height) / 2;
        let target = Rect::new(x, y, image_width.min(area.width), image_height.min(area.height));

        frame.render_widget(Paragraph::new(lines), target);
        Ok(())
    }
}
