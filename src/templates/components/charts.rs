//! Inline SVG charts.
//!
//! Everything is rendered server side; the browser only gets static SVG with
//! `<title>` children for hover text.

use crate::domain::format::format_amount;
use crate::domain::sectors::{house_type_name, Sector};
use crate::domain::stats::{CompositionRow, Facet};
use maud::{html, Markup};

/// Earth-tone colors for the house-type stacks (one per type code 1..=6).
const STACK_COLORS: [&str; 6] = [
    "#3d5a80", "#5b8e7d", "#8cb369", "#f4e285", "#f4a259", "#bc4b51",
];

const FACET_COLORS: [&str; 5] = ["#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a"];

/// Maps a data interval onto a pixel interval.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
            r0: range.0,
            r1: range.1,
        }
    }

    pub fn map(&self, v: f64) -> f64 {
        if self.d1 == self.d0 {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }
}

fn px(v: f64) -> String {
    format!("{v:.1}")
}

/// `(min, max)` of the values, widened by 5% on each side.
fn padded_extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1.0);
    (lo - pad, hi + pad)
}

/// Visible area of the map, in projected meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapDot {
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub label: String,
}

pub fn house_map(
    window: MapWindow,
    houses: &[MapDot],
    landmarks: &[MapDot],
    width: u32,
    height: u32,
) -> Markup {
    let w = f64::from(width);
    let h = f64::from(height);
    let sx = LinearScale::new((window.x_min, window.x_max), (0.0, w));
    // SVG y grows downward
    let sy = LinearScale::new((window.y_min, window.y_max), (h, 0.0));
    let house_r = if width < 500 { 3.0 } else { 4.5 };

    html! {
        svg class="map" xmlns="http://www.w3.org/2000/svg"
            viewBox=(format!("0 0 {width} {height}")) width=(width) height=(height)
            role="img" aria-label="Ames Iowa Housing Map" {
            rect x="0" y="0" width=(width) height=(height) fill="#eef1f4" {}
            g class="houses" {
                @for dot in houses {
                    circle cx=(px(sx.map(dot.x))) cy=(px(sy.map(dot.y))) r=(house_r)
                        fill=(dot.color) fill-opacity="0.8" stroke="black" stroke-width="0.5" {
                        title { (dot.label) }
                    }
                }
            }
            g class="landmarks" {
                @for mark in landmarks {
                    circle cx=(px(sx.map(mark.x))) cy=(px(sy.map(mark.y))) r="9"
                        fill="pink" fill-opacity="0.8" stroke="red" {
                        title { (mark.label) }
                    }
                }
            }
        }
    }
}

/// Vertical legend for a continuous color map.
pub fn color_bar(title: &str, low: f64, high: f64, palette: &[&str]) -> Markup {
    let step = 100.0 / palette.len() as f64;

    html! {
        div class="color-bar" {
            div class="color-bar-title" { (title) }
            svg xmlns="http://www.w3.org/2000/svg" width="60" height="220" viewBox="0 0 60 220" {
                @for (i, color) in palette.iter().enumerate() {
                    // highest value on top
                    rect x="0" y=(px(10.0 + 200.0 - (i as f64 + 1.0) * step * 2.0))
                        width="10" height=(px(step * 2.0)) fill=(color) {}
                }
                text x="14" y="16" font-size="10" { (format_amount(high / 1000.0)) }
                text x="14" y="212" font-size="10" { (format_amount(low / 1000.0)) }
            }
        }
    }
}

fn stack_color(house_type: u8) -> &'static str {
    STACK_COLORS[usize::from(house_type.saturating_sub(1)) % STACK_COLORS.len()]
}

struct Segment {
    house_type: u8,
    start: f64,
    end: f64,
}

/// Cumulative share intervals of one sector's bar, bottom to top.
fn stack_segments(rows: &[CompositionRow], sector: Sector) -> Vec<Segment> {
    let mut acc = 0.0;
    rows.iter()
        .map(|row| {
            let share = row
                .shares
                .iter()
                .find(|(s, _)| *s == sector)
                .map_or(0.0, |(_, v)| *v);
            let seg = Segment {
                house_type: row.house_type,
                start: acc,
                end: acc + share,
            };
            acc += share;
            seg
        })
        .collect()
}

/// House-type composition per sector as stacked bars, with the chosen
/// per-house value drawn as a strip plot on a secondary axis.
pub fn stacked_bars(
    rows: &[CompositionRow],
    overlay: &[(Sector, f64)],
    overlay_label: &str,
) -> Markup {
    let (w, h) = (760.0, 420.0);
    let (left, right, top, bottom) = (60.0, 90.0, 20.0, 40.0);
    let plot_w = w - left - right;
    let band = plot_w / Sector::PLOT_ORDER.len() as f64;
    let bar_w = band * 0.8;

    let share_y = LinearScale::new((0.0, 1.0), (h - bottom, top));
    let overlay_y = LinearScale::new(padded_extent(overlay.iter().map(|(_, v)| *v)), (h - bottom, top));

    html! {
        svg class="chart" xmlns="http://www.w3.org/2000/svg"
            viewBox=(format!("0 0 {w} {h}")) width=(w) height=(h) {
            // primary axis
            line x1=(left) y1=(top) x2=(left) y2=(h - bottom) stroke="#444" {}
            @for tick in [0.0, 0.25, 0.5, 0.75, 1.0] {
                text x=(left - 8.0) y=(px(share_y.map(tick) + 4.0)) text-anchor="end" font-size="11" {
                    (format!("{tick:.2}"))
                }
            }
            text x="14" y=(h / 2.0) font-size="12"
                transform=(format!("rotate(-90 14 {})", h / 2.0)) text-anchor="middle" { "Proportion" }

            @for (i, sector) in Sector::PLOT_ORDER.iter().enumerate() {
                @let x = left + band * i as f64 + (band - bar_w) / 2.0;
                @for seg in stack_segments(rows, *sector) {
                    @let y_top = share_y.map(seg.end);
                    @let y_bottom = share_y.map(seg.start);
                    rect x=(px(x)) y=(px(y_top)) width=(px(bar_w)) height=(px(y_bottom - y_top)) fill=(stack_color(seg.house_type)) {
                        title {
                            (house_type_name(seg.house_type).unwrap_or("Other"))
                            ": " (format!("{:.0}%", (seg.end - seg.start) * 100.0))
                        }
                    }
                }
                text x=(px(x + bar_w / 2.0)) y=(h - bottom + 16.0) text-anchor="middle" font-size="12" {
                    (sector.code())
                }
            }

            g class="overlay" {
                @for (j, (sector, value)) in overlay.iter().enumerate() {
                    @let i = Sector::PLOT_ORDER.iter().position(|s| s == sector).unwrap_or(0);
                    @let jitter = ((j * 7919) % 100) as f64 / 100.0 - 0.5;
                    @let cx = left + band * (i as f64 + 0.5) + jitter * bar_w * 0.6;
                    circle cx=(px(cx)) cy=(px(overlay_y.map(*value))) r="3"
                        fill="#999" stroke="black" stroke-width="0.5" {}
                }
            }

            // secondary axis
            line x1=(w - right) y1=(top) x2=(w - right) y2=(h - bottom) stroke="#444" {}
            text x=(w - right + 8.0) y=(top + 4.0) font-size="11" {
                (format_amount(overlay.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max).max(0.0)))
            }
            text x=(w - right + 8.0) y=(h - bottom) font-size="11" { (overlay_label) }

            g class="legend" {
                @for (k, row) in rows.iter().enumerate() {
                    rect x=(w - right + 8.0) y=(px(top + 30.0 + k as f64 * 16.0)) width="10" height="10" fill=(stack_color(row.house_type)) {}
                    text x=(w - right + 22.0) y=(px(top + 39.0 + k as f64 * 16.0)) font-size="10" {
                        (row.house_type)
                    }
                }
            }
        }
    }
}

/// One scatterplot per facet (living area vs. sale price) with its OLS line.
pub fn facet_scatter(facets: &[Facet], title: &str) -> Markup {
    let all_x = || facets.iter().flat_map(|f| f.points.iter().map(|p| p.0));
    let all_y = || facets.iter().flat_map(|f| f.points.iter().map(|p| p.1));
    let x_extent = padded_extent(all_x());
    let y_extent = padded_extent(all_y());

    let (panel_w, panel_h) = (200.0, 260.0);
    let pad = 30.0;

    html! {
        div class="facets" {
            h3 { (title) }
            div class="facet-row" {
                @for (i, facet) in facets.iter().enumerate() {
                    @let color = FACET_COLORS[i % FACET_COLORS.len()];
                    @let sx = LinearScale::new(x_extent, (pad, panel_w - 6.0));
                    @let sy = LinearScale::new(y_extent, (panel_h - pad, 6.0));
                    figure class="facet" {
                        figcaption { (facet.category) " (" (facet.points.len()) ")" }
                        svg xmlns="http://www.w3.org/2000/svg" width=(panel_w) height=(panel_h)
                            viewBox=(format!("0 0 {panel_w} {panel_h}")) {
                            rect x=(pad) y="6" width=(panel_w - pad - 6.0) height=(panel_h - pad - 6.0) fill="#f5f6fa" {}
                            @for (x, y) in &facet.points {
                                circle cx=(px(sx.map(*x))) cy=(px(sy.map(*y))) r="3" fill=(color) fill-opacity="0.7" {
                                    title { (format_amount(*x)) " sf, $" (format_amount(*y)) }
                                }
                            }
                            @if let Some(trend) = facet.trend {
                                line class="trendline"
                                    x1=(px(sx.map(x_extent.0))) y1=(px(sy.map(trend.at(x_extent.0))))
                                    x2=(px(sx.map(x_extent.1))) y2=(px(sy.map(trend.at(x_extent.1))))
                                    stroke=(color) stroke-width="1.5" {}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::Trendline;

    #[test]
    fn scale_maps_endpoints_and_handles_flat_domain() {
        let s = LinearScale::new((10.0, 20.0), (0.0, 100.0));
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(15.0), 50.0);
        assert_eq!(LinearScale::new((3.0, 3.0), (0.0, 10.0)).map(3.0), 5.0);
    }

    #[test]
    fn map_places_dots_inside_window() {
        let window = MapWindow {
            x_min: 0.0,
            x_max: 100.0,
            y_min: 0.0,
            y_max: 100.0,
        };
        let dot = MapDot {
            x: 50.0,
            y: 75.0,
            color: "#fff".into(),
            label: "Jack Trice Stadium".into(),
        };
        let svg = house_map(window, &[], &[dot], 200, 200).into_string();

        assert!(svg.contains(r#"cx="100.0" cy="50.0""#));
        assert!(svg.contains("<title>Jack Trice Stadium</title>"));
    }

    #[test]
    fn facets_draw_trendlines_only_when_fitted() {
        let facets = vec![
            Facet {
                category: "Y".into(),
                points: vec![(1000.0, 100_000.0), (2000.0, 200_000.0)],
                trend: Some(Trendline {
                    slope: 100.0,
                    intercept: 0.0,
                }),
            },
            Facet {
                category: "N".into(),
                points: vec![(1500.0, 90_000.0)],
                trend: None,
            },
        ];
        let html = facet_scatter(&facets, "Sale Price vs. GoodLivArea by CentralAir").into_string();

        assert_eq!(html.matches("class=\"trendline\"").count(), 1);
        assert!(html.contains("Y (2)"));
        assert!(html.contains("N (1)"));
    }
}
