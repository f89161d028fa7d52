//! Chart widgets for the dashboard
//!
//! Stateless render helpers: bar charts (plain and grouped), pie charts drawn
//! on a braille canvas, and text box plots. Every helper renders an empty
//! bordered panel with a note when its series is empty.

use crate::model::{BoxStats, Category, Distribution};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
    },
    Frame,
};

/// Series colours, cycled in order
pub const PALETTE: [Color; 3] = [
    Color::Rgb(0, 139, 139),   // dark cyan
    Color::Rgb(173, 255, 47),  // green yellow
    Color::Rgb(218, 112, 214), // orchid
];

pub fn series_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Format with two significant digits ("72", "8.7", "0.12")
pub fn two_significant(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (1 - magnitude).max(0) as usize;
    format!("{:.*}", decimals, value)
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
}

/// Bordered panel saying there is nothing to plot
pub fn render_empty(frame: &mut Frame, area: Rect, title: &str) {
    let message = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No data for the current selection",
            Style::default().fg(Color::Yellow),
        )),
    ])
    .alignment(Alignment::Center)
    .block(chart_block(title));
    frame.render_widget(message, area);
}

/// Bar width that spreads `bars` across the inner width of `area`
fn fit_bar_width(area: Rect, bars: usize, gap: u16) -> u16 {
    if bars == 0 {
        return 1;
    }
    let inner = area.width.saturating_sub(2);
    (inner / bars as u16).saturating_sub(gap).clamp(1, 12)
}

/// Histogram of counts, one coloured bar per category
pub fn render_count_chart(frame: &mut Frame, area: Rect, title: &str, counts: &[(Category, usize)]) {
    if counts.is_empty() {
        render_empty(frame, area, title);
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (category, count))| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(category.to_string()))
                .style(Style::default().fg(series_color(i)))
                .value_style(Style::default().fg(Color::Black).bg(series_color(i)))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(fit_bar_width(area, bars.len(), 2))
        .bar_gap(2);
    frame.render_widget(chart, area);
}

/// Bar chart of a percentage distribution, labelled "72 %"
pub fn render_percent_chart(frame: &mut Frame, area: Rect, title: &str, dist: &Distribution) {
    if dist.is_empty() {
        render_empty(frame, area, title);
        return;
    }

    let bars: Vec<Bar> = dist
        .iter()
        .enumerate()
        .map(|(i, (category, pct))| {
            Bar::default()
                // Tenths of a percent keep small shares visible
                .value((pct * 10.0).round() as u64)
                .text_value(format!("{} %", two_significant(*pct)))
                .label(Line::from(category.to_string()))
                .style(Style::default().fg(series_color(i)))
                .value_style(Style::default().fg(Color::Black).bg(series_color(i)))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(fit_bar_width(area, bars.len(), 2))
        .bar_gap(2);
    frame.render_widget(chart, area);
}

/// A group of bars sharing one x-axis label
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeriesGroup {
    pub label: String,
    /// One value per series, in legend order
    pub values: Vec<u64>,
}

/// Grouped bar chart with a colour legend underneath
pub fn render_grouped_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[String],
    groups: &[BarSeriesGroup],
) {
    if groups.is_empty() || series.is_empty() {
        render_empty(frame, area, title);
        return;
    }

    let block = chart_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let bar_groups: Vec<BarGroup> = groups
        .iter()
        .map(|group| {
            let bars: Vec<Bar> = group
                .values
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    Bar::default()
                        .value(*value)
                        .style(Style::default().fg(series_color(i)))
                        .value_style(Style::default().fg(Color::Black).bg(series_color(i)))
                })
                .collect();
            BarGroup::default()
                .label(Line::from(group.label.clone()))
                .bars(&bars)
        })
        .collect();

    let per_group = series.len() as u16;
    let slots = groups.len() * series.len();
    let bar_width = fit_bar_width(chunks[0], slots, 1).min(6);
    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(per_group.min(2));
    for group in bar_groups {
        chart = chart.data(group);
    }
    frame.render_widget(chart, chunks[0]);

    frame.render_widget(Paragraph::new(legend_line(series)), chunks[1]);
}

fn legend_line(series: &[String]) -> Line<'static> {
    let spans: Vec<Span> = series
        .iter()
        .enumerate()
        .flat_map(|(i, name)| {
            vec![
                Span::styled("■ ", Style::default().fg(series_color(i))),
                Span::raw(format!("{}  ", name)),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Which slice a fraction of the full turn falls into
fn slice_at(cumulative: &[f64], fraction: f64) -> usize {
    cumulative
        .iter()
        .position(|&end| fraction < end)
        .unwrap_or(cumulative.len().saturating_sub(1))
}

/// Pie chart of a distribution, with a percentage legend on the right
pub fn render_pie_chart(frame: &mut Frame, area: Rect, title: &str, dist: &Distribution) {
    if dist.is_empty() {
        render_empty(frame, area, title);
        return;
    }

    let block = chart_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(18)])
        .split(inner);
    let canvas_area = chunks[0];
    if canvas_area.width == 0 || canvas_area.height == 0 {
        return;
    }

    // Braille dots are square, so scale x to the cell grid to keep the pie round
    let dots_w = canvas_area.width as usize * 2;
    let dots_h = canvas_area.height as usize * 4;
    let y_radius = 1.05;
    let x_radius = y_radius * dots_w as f64 / dots_h as f64;

    let total: f64 = dist.iter().map(|(_, pct)| pct).sum();
    let cumulative: Vec<f64> = dist
        .iter()
        .scan(0.0, |acc, (_, pct)| {
            *acc += pct / total;
            Some(*acc)
        })
        .collect();

    let mut slices: Vec<Vec<(f64, f64)>> = vec![Vec::new(); dist.len()];
    for i in 0..dots_w {
        let x = -x_radius + (i as f64 + 0.5) * (2.0 * x_radius / dots_w as f64);
        for j in 0..dots_h {
            let y = -y_radius + (j as f64 + 0.5) * (2.0 * y_radius / dots_h as f64);
            if x * x + y * y > 1.0 {
                continue;
            }
            // Clockwise from twelve o'clock
            let turn = (90.0 - y.atan2(x).to_degrees()).rem_euclid(360.0) / 360.0;
            slices[slice_at(&cumulative, turn)].push((x, y));
        }
    }

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_radius, x_radius])
        .y_bounds([-y_radius, y_radius])
        .paint(|ctx| {
            for (i, coords) in slices.iter().enumerate() {
                ctx.draw(&Points {
                    coords,
                    color: series_color(i),
                });
            }
        });
    frame.render_widget(canvas, canvas_area);

    let legend: Vec<Line> = dist
        .iter()
        .enumerate()
        .map(|(i, (category, pct))| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(series_color(i))),
                Span::styled(
                    format!("{:<6}", category.to_string()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>5.1}%", pct),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), chunks[1]);
}

/// Map a value onto a column of a track `width` cells wide
fn scale(value: f64, lo: f64, hi: f64, width: usize) -> usize {
    if width <= 1 || hi <= lo {
        return 0;
    }
    let position = (value - lo) / (hi - lo) * (width - 1) as f64;
    (position.round().max(0.0) as usize).min(width - 1)
}

/// Characters of one box plot row, before styling
fn box_row(stats: &BoxStats, lo: f64, hi: f64, width: usize) -> Vec<char> {
    let mut row = vec![' '; width];
    if width == 0 {
        return row;
    }

    let min = scale(stats.min, lo, hi, width);
    let q1 = scale(stats.q1, lo, hi, width);
    let median = scale(stats.median, lo, hi, width);
    let q3 = scale(stats.q3, lo, hi, width);
    let max = scale(stats.max, lo, hi, width);

    for cell in row.iter_mut().take(q1).skip(min) {
        *cell = '─';
    }
    for cell in row.iter_mut().take(max + 1).skip(q3) {
        *cell = '─';
    }
    for cell in row.iter_mut().take(q3 + 1).skip(q1) {
        *cell = '█';
    }
    if min < q1 {
        row[min] = '├';
    }
    if max > q3 {
        row[max] = '┤';
    }
    row[median] = '┃';
    for &outlier in &stats.outliers {
        row[scale(outlier, lo, hi, width)] = '•';
    }
    row
}

/// Horizontal box plots, one row per group on a shared axis
pub fn render_box_plot(frame: &mut Frame, area: Rect, title: &str, boxes: &[(Category, BoxStats)]) {
    if boxes.is_empty() {
        render_empty(frame, area, title);
        return;
    }

    let block = chart_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (lo, hi) = boxes.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (_, stats)| {
        let (min, max) = stats.range();
        (lo.min(min), hi.max(max))
    });

    const LABEL_WIDTH: usize = 11;
    let track_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 8);

    let mut lines = Vec::new();
    for (i, (category, stats)) in boxes.iter().enumerate() {
        let color = series_color(i);
        let mut spans = vec![Span::styled(
            format!("{:<width$}", category.to_string(), width = LABEL_WIDTH),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        spans.extend(box_row(stats, lo, hi, track_width).into_iter().map(|c| {
            let style = match c {
                '┃' => Style::default().fg(Color::White).bg(color),
                '•' => Style::default().fg(Color::Red),
                _ => Style::default().fg(color),
            };
            Span::styled(c.to_string(), style)
        }));
        spans.push(Span::styled(
            format!(" n={}", stats.count),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(
            format!(
                "{:width$}med {:.1}  q1 {:.1}  q3 {:.1}",
                "",
                stats.median,
                stats.q1,
                stats.q3,
                width = LABEL_WIDTH
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Axis labels under the track
    let lo_label = format!("{:.0}", lo);
    let hi_label = format!("{:.0}", hi);
    let padding = track_width.saturating_sub(lo_label.len() + hi_label.len());
    lines.push(Line::from(Span::styled(
        format!(
            "{:label$}{}{:pad$}{}",
            "",
            lo_label,
            "",
            hi_label,
            label = LABEL_WIDTH,
            pad = padding
        ),
        Style::default().fg(Color::Gray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
