use geo::{LineString, Point, Polygon};
use tracing::warn;

use crate::canvas::{SvgCanvas, TEXT_STYLE};
use crate::models::{common::translate, traits::IDrawable};

/// シルエットの塗りスタイル（暗いグレー、輪郭線なし）
///
/// 塗り色の濃さだけがターゲットとの視覚的な区別です。
const FILL_STYLE: &str = "fill-opacity:1.0;fill:rgb(80,80,80)";

/// 計画経路の描画スタイル（青の細線、塗りなし）
const PATH_STYLE: &str = "fill-opacity:0.8;fill:none;stroke:rgb(0,0,255);stroke-width:2";

/// 移動障害物
///
/// 監視対象ではないものの、移動して視界や経路を遮る物体を表します。
/// 構造はターゲットと同一で、描画時の塗り色のみ異なります。
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// 足あと形状（ローカル座標系のポリゴン）
    pub shape: Polygon<f64>,
    /// 計画経路のウェイポイント列
    pub path: LineString<f64>,
    /// 移動速度（m/s）
    pub velocity: f64,
}

impl Obstacle {
    /// 新しい障害物を作成
    pub fn new(shape: Polygon<f64>, path: LineString<f64>, velocity: f64) -> Self {
        Self {
            shape,
            path,
            velocity,
        }
    }

    /// 経路の開始ウェイポイント（経路が空の場合はNone）
    pub fn start_point(&self) -> Option<Point<f64>> {
        self.path.points().next()
    }
}

impl IDrawable for Obstacle {
    fn draw(&self, canvas: &mut SvgCanvas) {
        let Some(start) = self.start_point() else {
            warn!("経路が空のため{}の描画をスキップします", self.kind());
            return;
        };
        canvas.map_polygon(&translate(&self.shape, start), FILL_STYLE);
        canvas.map_line(&self.path, PATH_STYLE);
        if self.path.0.len() > 1 {
            canvas.text(start, &format!("{} m/s", self.velocity), TEXT_STYLE);
        }
    }

    fn kind(&self) -> &'static str {
        "obstacle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::VIEWPORT_SIZE;
    use crate::models::common::{parse_wkt_polygon, parse_wkt_waypoints};

    #[test]
    fn test_draw_uses_darker_fill() {
        let obstacle = Obstacle::new(
            parse_wkt_polygon("POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))").unwrap(),
            parse_wkt_waypoints("LINESTRING(2 2,3 3)").unwrap(),
            0.5,
        );
        let mut canvas = SvgCanvas::new(VIEWPORT_SIZE, VIEWPORT_SIZE);
        obstacle.draw(&mut canvas);
        let svg = canvas.to_svg();
        assert!(svg.contains("fill:rgb(80,80,80)"));
        assert!(svg.contains(">0.5 m/s<"));
        assert_eq!(canvas.shape_count(), 2);
    }
}
