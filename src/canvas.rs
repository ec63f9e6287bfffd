//! # Canvas モジュール
//!
//! 自動スケーリング付きのSVG描画サーフェスを提供します。
//!
//! `add` で登録された図形のバウンディング領域から、固定ビューポート
//! （デバイス単位 400×400）へのワールド→デバイス変換を導出し、
//! `map_*` / `text` で積まれた描画命令を `to_svg` で一括出力します。
//! スタイルは `key:value;key:value` 形式の文字列をそのまま
//! `style` 属性として埋め込みます。

use geo::{LineString, Point, Polygon};
use std::fmt::Write as _;

/// 出力ビューポートの一辺（デバイス単位）
pub const VIEWPORT_SIZE: u32 = 400;

/// テキスト注記の共通スタイル
pub const TEXT_STYLE: &str = "fill:rgb(0,0,0);font-family:Arial;font-size:15px";

/// 注記フォントの行送り（px、font-sizeと同値）
const LINE_HEIGHT_PX: f64 = 15.0;

/// 登録済み図形のバウンディング領域
#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    fn expand(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// 描画命令（積まれた順に出力される）
#[derive(Debug, Clone)]
enum DrawOp {
    /// 閉じた外周（ポリゴン）
    Ring { coords: Vec<(f64, f64)>, style: String },
    /// 折れ線（ラインストリング）
    Polyline { coords: Vec<(f64, f64)>, style: String },
    /// 円マーカー（半径はデバイス単位）
    Marker {
        center: (f64, f64),
        radius_px: f64,
        style: String,
    },
    /// テキスト注記（改行は複数行として出力）
    Label {
        anchor: (f64, f64),
        text: String,
        style: String,
    },
}

/// 自動スケーリングSVGキャンバス
///
/// 描画命令はワールド座標（メートル）で受け取り、出力時に
/// デバイス座標へ変換します。Y軸は上向きが正になるよう反転されます。
pub struct SvgCanvas {
    /// ビューポート幅（デバイス単位）
    width: u32,
    /// ビューポート高さ（デバイス単位）
    height: u32,
    /// 登録済みバウンディング領域（未登録ならNone）
    extent: Option<Extent>,
    /// 積まれた描画命令
    ops: Vec<DrawOp>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            extent: None,
            ops: Vec::new(),
        }
    }

    /// ポリゴンをバウンディング領域へ登録
    ///
    /// 登録された図形だけがビューポートのスケール決定に寄与します。
    pub fn add(&mut self, shape: &Polygon<f64>) {
        for c in shape.exterior().coords() {
            if let Some(extent) = &mut self.extent {
                extent.expand(c.x, c.y);
            } else {
                self.extent = Some(Extent {
                    min_x: c.x,
                    min_y: c.y,
                    max_x: c.x,
                    max_y: c.y,
                });
            }
        }
    }

    /// ポリゴンの描画命令を積む
    pub fn map_polygon(&mut self, shape: &Polygon<f64>, style: &str) {
        let coords = shape.exterior().coords().map(|c| (c.x, c.y)).collect();
        self.ops.push(DrawOp::Ring {
            coords,
            style: style.to_string(),
        });
    }

    /// 折れ線の描画命令を積む
    pub fn map_line(&mut self, line: &LineString<f64>, style: &str) {
        let coords = line.coords().map(|c| (c.x, c.y)).collect();
        self.ops.push(DrawOp::Polyline {
            coords,
            style: style.to_string(),
        });
    }

    /// 円マーカーの描画命令を積む（半径はデバイス単位のpx）
    pub fn map_point(&mut self, center: Point<f64>, style: &str, radius_px: f64) {
        self.ops.push(DrawOp::Marker {
            center: (center.x(), center.y()),
            radius_px,
            style: style.to_string(),
        });
    }

    /// テキスト注記の描画命令を積む（`\n` で複数行）
    pub fn text(&mut self, anchor: Point<f64>, text: &str, style: &str) {
        self.ops.push(DrawOp::Label {
            anchor: (anchor.x(), anchor.y()),
            text: text.to_string(),
            style: style.to_string(),
        });
    }

    /// 積まれた図形描画命令の数（テキスト注記を除く）
    pub fn shape_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, DrawOp::Label { .. }))
            .count()
    }

    /// 積まれたテキスト注記の数
    pub fn text_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Label { .. }))
            .count()
    }

    /// ワールド→デバイス変換のパラメータ（スケールと原点）を導出
    ///
    /// 縦横比は維持し、登録領域が退化している場合は等倍にフォールバック
    /// します。
    fn transform(&self) -> (f64, f64, f64) {
        let Some(extent) = self.extent else {
            return (1.0, 0.0, 0.0);
        };
        let span_x = extent.max_x - extent.min_x;
        let span_y = extent.max_y - extent.min_y;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (self.width as f64 / span_x).min(self.height as f64 / span_y),
            (true, false) => self.width as f64 / span_x,
            (false, true) => self.height as f64 / span_y,
            (false, false) => 1.0,
        };
        (scale, extent.min_x, extent.min_y)
    }

    /// SVGドキュメント文字列を生成
    pub fn to_svg(&self) -> String {
        let (scale, min_x, min_y) = self.transform();
        let to_device = |(x, y): (f64, f64)| -> (f64, f64) {
            (
                (x - min_x) * scale,
                self.height as f64 - (y - min_y) * scale,
            )
        };

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            self.width, self.height
        )
        .unwrap();

        for op in &self.ops {
            match op {
                DrawOp::Ring { coords, style } => {
                    if coords.len() < 2 {
                        continue;
                    }
                    let path = path_data(coords.iter().map(|&c| to_device(c)));
                    writeln!(svg, r#"  <path d="{}Z" style="{}"/>"#, path, style).unwrap();
                }
                DrawOp::Polyline { coords, style } => {
                    if coords.len() < 2 {
                        continue;
                    }
                    let path = path_data(coords.iter().map(|&c| to_device(c)));
                    writeln!(svg, r#"  <path d="{}" style="{}"/>"#, path, style).unwrap();
                }
                DrawOp::Marker {
                    center,
                    radius_px,
                    style,
                } => {
                    let (cx, cy) = to_device(*center);
                    writeln!(
                        svg,
                        r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" style="{}"/>"#,
                        cx, cy, radius_px, style
                    )
                    .unwrap();
                }
                DrawOp::Label {
                    anchor,
                    text,
                    style,
                } => {
                    let (x, y) = to_device(*anchor);
                    let mut lines = text.split('\n');
                    write!(
                        svg,
                        r#"  <text x="{:.2}" y="{:.2}" style="{}">{}"#,
                        x,
                        y,
                        style,
                        xml_escape(lines.next().unwrap_or(""))
                    )
                    .unwrap();
                    for line in lines {
                        write!(
                            svg,
                            r#"<tspan x="{:.2}" dy="{}">{}</tspan>"#,
                            x,
                            LINE_HEIGHT_PX,
                            xml_escape(line)
                        )
                        .unwrap();
                    }
                    svg.push_str("</text>\n");
                }
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// 座標列をSVGパスデータ（`M x,y L x,y ...`）へ変換
fn path_data(coords: impl Iterator<Item = (f64, f64)>) -> String {
    let mut data = String::new();
    for (i, (x, y)) in coords.enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        write!(data, "{}{:.2},{:.2}", cmd, x, y).unwrap();
    }
    data
}

/// テキスト内容のXMLエスケープ
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
