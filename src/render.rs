//! # Render モジュール
//!
//! シーン描画パイプラインの中核となるレンダリングエンジンを提供します。
//!
//! このモジュールは、読み込んだシーンモデルをキャンバスへ描き出す
//! 一方向のパイプラインを管理します。描画は次の固定カテゴリ順で
//! 実行され、後のカテゴリほど前面に重なります：
//!
//! 1. **境界**: 黒の太い輪郭線（範囲登録も兼ねる）
//! 2. **ターゲット**: シルエット・経路・速度注記
//! 3. **障害物**: ターゲットと同一処理（塗り色のみ暗いグレー）
//! 4. **カメラ**: 位置マーカー・視野扇形・速度注記
//!
//! パイプラインは分岐もリトライもない直線的な一回実行で、途中の失敗は
//! その実行全体の失敗です。出力リソースは呼び出し側がシーン構築前に
//! 確保し、成功・失敗いずれの経路でも解放されます。

use std::io::Write;

use tracing::{debug, info};

use crate::canvas::{SvgCanvas, VIEWPORT_SIZE};
use crate::models::{IDrawable, Scene};
use crate::scene::{SceneConfig, SceneError};

/// 境界ポリゴンの描画スタイル（黒の太い輪郭線、塗りなし）
const BOUNDARY_STYLE: &str = "fill-opacity:1.0;fill:none;stroke:rgb(0,0,0);stroke-width:5";

/// シーン描画エンジン
///
/// キャンバスと出力先の生存期間を所有し、シーンモデルの構築から
/// SVGドキュメントの書き出しまでを一回の実行として駆動します。
pub struct RenderEngine<W: Write> {
    pub canvas: SvgCanvas,
    pub scene: Option<Scene>,
    pub scene_config: SceneConfig,
    pub verbose_level: u8,
    out: W,
}

impl<W: Write> RenderEngine<W> {
    pub fn new(config: SceneConfig, out: W, verbose_level: u8) -> Self {
        Self {
            canvas: SvgCanvas::new(VIEWPORT_SIZE, VIEWPORT_SIZE),
            scene: None,
            scene_config: config,
            verbose_level,
            out,
        }
    }

    /// シーンモデルの構築
    ///
    /// シーン記述のWKT解析と単位変換を行い、描画対象のスナップショットを
    /// 確定します。必須ジオメトリの解析失敗は致命的エラーです。
    pub fn initialize(&mut self) -> Result<(), SceneError> {
        let scene = Scene::from_config(&self.scene_config)?;

        if self.verbose_level > 0 {
            info!("シーンモデル構築完了:");
            info!("  ターゲット: {}体", scene.targets.len());
            info!("  障害物: {}個", scene.obstacles.len());
            info!("  カメラ: {}台", scene.cameras.len());
        }

        self.scene = Some(scene);
        Ok(())
    }

    /// 描画パイプラインの実行と出力書き出し
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.scene.is_none() {
            return Err("シーンモデルが構築されていません".into());
        }

        self.draw_boundary();
        self.draw_targets();
        self.draw_obstacles();
        self.draw_cameras();

        let document = self.canvas.to_svg();
        self.out.write_all(document.as_bytes())?;
        self.out.flush()?;

        info!(
            "描画完了: 図形{}個 / 注記{}件",
            self.canvas.shape_count(),
            self.canvas.text_count()
        );

        Ok(())
    }

    /// 境界の描画（ビューポートの範囲登録も兼ねる）
    fn draw_boundary(&mut self) {
        let Some(scene) = &self.scene else { return };

        self.canvas.add(&scene.boundary);
        self.canvas.map_polygon(&scene.boundary, BOUNDARY_STYLE);

        if self.verbose_level > 1 {
            debug!("境界を描画しました");
        }
    }

    fn draw_targets(&mut self) {
        let Some(scene) = &self.scene else { return };

        for (i, target) in scene.targets.iter().enumerate() {
            target.draw(&mut self.canvas);
            if self.verbose_level > 1 {
                debug!("{}[{}]を描画しました ({} m/s)", target.kind(), i, target.velocity);
            }
        }
    }

    fn draw_obstacles(&mut self) {
        let Some(scene) = &self.scene else { return };

        for (i, obstacle) in scene.obstacles.iter().enumerate() {
            obstacle.draw(&mut self.canvas);
            if self.verbose_level > 1 {
                debug!("{}[{}]を描画しました", obstacle.kind(), i);
            }
        }
    }

    fn draw_cameras(&mut self) {
        let Some(scene) = &self.scene else { return };

        for (i, camera) in scene.cameras.iter().enumerate() {
            camera.draw(&mut self.canvas);
            if self.verbose_level > 1 {
                debug!(
                    "{}[{}]を描画しました (方位 {:.1}度)",
                    camera.kind(),
                    i,
                    crate::models::math_utils::rad_to_deg(camera.angle)
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CameraConfig, MovingEntityConfig};

    fn boundary_only_config() -> SceneConfig {
        SceneConfig {
            boundary: "POLYGON((0 0,10 0,10 10,0 10,0 0))".to_string(),
            camera_fov: 45.0,
            targets: Vec::new(),
            obstacles: Vec::new(),
            cameras: Vec::new(),
        }
    }

    fn render(config: SceneConfig) -> (SvgCanvas, Vec<u8>) {
        let mut engine = RenderEngine::new(config, Vec::new(), 0);
        engine.initialize().unwrap();
        engine.run().unwrap();
        (engine.canvas, engine.out)
    }

    #[test]
    fn test_boundary_only_scene_draws_exactly_one_shape() {
        let (canvas, out) = render(boundary_only_config());
        assert_eq!(canvas.shape_count(), 1);
        assert_eq!(canvas.text_count(), 0);
        assert!(out.starts_with(b"<?xml"));
    }

    #[test]
    fn test_run_without_initialize_fails() {
        let mut engine = RenderEngine::new(boundary_only_config(), Vec::new(), 0);
        assert!(engine.run().is_err());
    }

    #[test]
    fn test_end_to_end_target_scene() {
        let mut config = boundary_only_config();
        config.targets.push(MovingEntityConfig {
            shape: "POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))".to_string(),
            path: "LINESTRING(5 5,6 6)".to_string(),
            velocity: 2.0,
        });
        let (canvas, out) = render(config);

        // 境界 + シルエット + 経路
        assert_eq!(canvas.shape_count(), 3);
        assert_eq!(canvas.text_count(), 1);

        let svg = String::from_utf8(out).unwrap();
        // 境界 (0,0)-(10,10) がビューポート全体に収まる（スケール40、Y反転）
        assert!(svg.contains("M0.00,400.00"));
        // シルエットは (5,5) へ平行移動され、(4,4) が最初の頂点になる
        assert!(svg.contains("M160.00,240.00"));
        // 経路は (5,5) から (6,6) への折れ線
        assert!(svg.contains("M200.00,200.00L240.00,160.00"));
        // 速度注記は開始ウェイポイントに付く
        assert!(svg.contains(">2 m/s<"));
        assert!(svg.contains(r#"<text x="200.00" y="200.00""#));
    }

    #[test]
    fn test_obstacles_draw_after_targets() {
        let mut config = boundary_only_config();
        config.targets.push(MovingEntityConfig {
            shape: "POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))".to_string(),
            path: "LINESTRING(2 2,3 3)".to_string(),
            velocity: 1.0,
        });
        config.obstacles.push(MovingEntityConfig {
            shape: "POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))".to_string(),
            path: "LINESTRING(7 7,8 8)".to_string(),
            velocity: 1.0,
        });
        let (canvas, out) = render(config);
        assert_eq!(canvas.shape_count(), 5);

        let svg = String::from_utf8(out).unwrap();
        let target_fill = svg.find("fill:rgb(153,153,153)").unwrap();
        let obstacle_fill = svg.find("fill:rgb(80,80,80)").unwrap();
        assert!(target_fill < obstacle_fill);
    }

    #[test]
    fn test_camera_scene_emits_marker_wedge_and_label() {
        let mut config = boundary_only_config();
        config.camera_fov = 30.0;
        config.cameras.push(CameraConfig {
            pos: "POINT(5 5)".to_string(),
            angle: 0.0,
            max_velocity: 3.0,
            max_angular_velocity: 0.5,
        });
        let (canvas, out) = render(config);

        // 境界 + マーカー + 扇形
        assert_eq!(canvas.shape_count(), 3);
        assert_eq!(canvas.text_count(), 1);

        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains("fill:rgb(153,204,0)"));
        assert!(svg.contains("0.5 rad/s</tspan>"));
    }

    #[test]
    fn test_single_waypoint_entity_has_no_annotation() {
        let mut config = boundary_only_config();
        config.targets.push(MovingEntityConfig {
            shape: "POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))".to_string(),
            path: "LINESTRING(5 5)".to_string(),
            velocity: 2.0,
        });
        let (canvas, _) = render(config);
        assert_eq!(canvas.text_count(), 0);
    }
}
