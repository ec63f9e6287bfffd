use geo::{Coord, LineString, Point};

use crate::canvas::{SvgCanvas, TEXT_STYLE};
use crate::models::traits::IDrawable;

/// 視野扇形のレイ長（m）
const FOV_RAY_LENGTH_M: f64 = 2.0;

/// 設置位置マーカーの半径（デバイス単位px）
const MARKER_RADIUS_PX: f64 = 5.0;

/// 設置位置マーカーのスタイル（緑の半透明塗り）
const MARKER_STYLE: &str =
    "fill-opacity:0.5;fill:rgb(153,204,0);stroke:rgb(153,204,0);stroke-width:2";

/// 視野扇形のスタイル（緑の輪郭線、塗りなし）
const FOV_STYLE: &str = "fill-opacity:0.8;fill:none;stroke:rgb(153,204,0);stroke-width:2";

/// 固定カメラ
///
/// 視線方位と視野を持つ固定設置のセンサーです。視野半角はシーン全体で
/// 共通の値を構築時に受け取ります。格納される角度はすべてラジアンです。
#[derive(Debug, Clone)]
pub struct Camera {
    /// 設置位置
    pub position: Point<f64>,
    /// 視線方位（ラジアン）
    pub angle: f64,
    /// 視野半角（ラジアン、シーン全体で共通）
    pub fov: f64,
    /// 最大移動速度（m/s）
    pub max_velocity: f64,
    /// 最大角速度（rad/s）
    pub max_angular_velocity: f64,
}

impl Camera {
    /// 新しいカメラを作成
    ///
    /// # 引数
    ///
    /// * `position` - 設置位置
    /// * `angle` - 視線方位（ラジアン）
    /// * `fov` - 視野半角（ラジアン）
    /// * `max_velocity` - 最大移動速度（m/s）
    /// * `max_angular_velocity` - 最大角速度（rad/s）
    pub fn new(
        position: Point<f64>,
        angle: f64,
        fov: f64,
        max_velocity: f64,
        max_angular_velocity: f64,
    ) -> Self {
        Self {
            position,
            angle,
            fov,
            max_velocity,
            max_angular_velocity,
        }
    }

    /// 視野扇形を表す3点の折れ線を構築
    ///
    /// `方位 - 視野半角` のレイ終点、設置位置、`方位 + 視野半角` の
    /// レイ終点をこの順で結びます。レイ終点は
    /// `位置 + レイ長 * (cosθ, sinθ)` で計算されます。
    pub fn fov_wedge(&self) -> LineString<f64> {
        let ray_end = |theta: f64| Coord {
            x: self.position.x() + FOV_RAY_LENGTH_M * theta.cos(),
            y: self.position.y() + FOV_RAY_LENGTH_M * theta.sin(),
        };
        LineString::new(vec![
            ray_end(self.angle - self.fov),
            self.position.into(),
            ray_end(self.angle + self.fov),
        ])
    }
}

impl IDrawable for Camera {
    /// カメラを描画
    ///
    /// 設置位置の円マーカー、視野扇形の折れ線、最大速度と最大角速度の
    /// 2行注記を描画します。
    fn draw(&self, canvas: &mut SvgCanvas) {
        canvas.map_point(self.position, MARKER_STYLE, MARKER_RADIUS_PX);
        canvas.map_line(&self.fov_wedge(), FOV_STYLE);
        canvas.text(
            self.position,
            &format!(
                "{} m/s\n{} rad/s",
                self.max_velocity, self.max_angular_velocity
            ),
            TEXT_STYLE,
        );
    }

    fn kind(&self) -> &'static str {
        "camera"
    }
}
