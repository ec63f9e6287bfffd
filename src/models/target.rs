use geo::{LineString, Point, Polygon};
use tracing::warn;

use crate::canvas::{SvgCanvas, TEXT_STYLE};
use crate::models::{common::translate, traits::IDrawable};

/// シルエットの塗りスタイル（明るいグレー、輪郭線なし）
const FILL_STYLE: &str = "fill-opacity:1.0;fill:rgb(153,153,153)";

/// 計画経路の描画スタイル（青の細線、塗りなし）
const PATH_STYLE: &str = "fill-opacity:0.8;fill:none;stroke:rgb(0,0,255);stroke-width:2";

/// 移動ターゲット
///
/// 監視対象となる移動体（ロボットや歩行者など）を表します。
/// ローカル座標系の足あと形状と、計画経路のウェイポイント列、
/// 移動速度を保持する読み取り専用スナップショットです。
#[derive(Debug, Clone)]
pub struct Target {
    /// 足あと形状（ローカル座標系のポリゴン）
    pub shape: Polygon<f64>,
    /// 計画経路のウェイポイント列
    pub path: LineString<f64>,
    /// 移動速度（m/s）
    pub velocity: f64,
}

impl Target {
    /// 新しいターゲットを作成
    ///
    /// # 引数
    ///
    /// * `shape` - 足あと形状（ローカル座標系）
    /// * `path` - 計画経路のウェイポイント列
    /// * `velocity` - 移動速度（m/s）
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

impl IDrawable for Target {
    /// ターゲットを描画
    ///
    /// 足あと形状を経路の開始ウェイポイントへ平行移動して塗りつぶし、
    /// 経路全体を折れ線として描画します。ウェイポイントが2点以上ある
    /// 場合のみ、開始点に速度の注記を付与します。
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
        "target"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::VIEWPORT_SIZE;
    use crate::models::common::{parse_wkt_polygon, parse_wkt_waypoints};

    fn unit_square() -> Polygon<f64> {
        parse_wkt_polygon("POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))").unwrap()
    }

    #[test]
    fn test_draw_emits_silhouette_path_and_label() {
        let target = Target::new(
            unit_square(),
            parse_wkt_waypoints("LINESTRING(5 5,6 6)").unwrap(),
            2.0,
        );
        let mut canvas = SvgCanvas::new(VIEWPORT_SIZE, VIEWPORT_SIZE);
        target.draw(&mut canvas);
        assert_eq!(canvas.shape_count(), 2);
        assert_eq!(canvas.text_count(), 1);
        assert!(canvas.to_svg().contains(">2 m/s<"));
    }

    #[test]
    fn test_single_waypoint_path_has_no_label() {
        let target = Target::new(
            unit_square(),
            parse_wkt_waypoints("LINESTRING(5 5)").unwrap(),
            2.0,
        );
        let mut canvas = SvgCanvas::new(VIEWPORT_SIZE, VIEWPORT_SIZE);
        target.draw(&mut canvas);
        assert_eq!(canvas.text_count(), 0);
    }

    #[test]
    fn test_empty_path_is_skipped() {
        let target = Target::new(unit_square(), LineString::new(vec![]), 1.0);
        let mut canvas = SvgCanvas::new(VIEWPORT_SIZE, VIEWPORT_SIZE);
        target.draw(&mut canvas);
        assert_eq!(canvas.shape_count(), 0);
        assert_eq!(canvas.text_count(), 0);
    }

    #[test]
    fn test_start_point_is_first_waypoint() {
        let target = Target::new(
            unit_square(),
            parse_wkt_waypoints("LINESTRING(3 4,7 8)").unwrap(),
            1.0,
        );
        let start = target.start_point().unwrap();
        assert_eq!((start.x(), start.y()), (3.0, 4.0));
    }
}
