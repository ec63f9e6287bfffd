use geo::Polygon;
use tracing::debug;

use crate::models::camera::Camera;
use crate::models::common::{self, math_utils};
use crate::models::obstacle::Obstacle;
use crate::models::target::Target;
use crate::scene::{SceneConfig, SceneError};

/// シーン全体の読み取り専用スナップショット
///
/// 入力記述から一度だけ構築され、以降は変更されません。
/// 格納される角度はすべてラジアンです。各エンティティ列の順序は
/// 入力記述の順序を保持します（描画順 = 重なり順）。
#[derive(Debug, Clone)]
pub struct Scene {
    /// シーン全体の境界ポリゴン
    pub boundary: Polygon<f64>,
    /// 移動ターゲット（入力順）
    pub targets: Vec<Target>,
    /// 移動障害物（入力順）
    pub obstacles: Vec<Obstacle>,
    /// 全カメラ共通の視野半角（ラジアン）
    pub camera_fov: f64,
    /// 固定カメラ（入力順）
    pub cameras: Vec<Camera>,
}

impl Scene {
    /// シーン記述からシーンモデルを構築
    ///
    /// 各WKT文字列の解析と度→ラジアン変換はここで一度だけ行われます。
    /// 必須ジオメトリの解析失敗は致命的エラーで、部分的なシーンは
    /// 構築されません。
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        let boundary = common::parse_wkt_polygon(&config.boundary)
            .map_err(|e| SceneError::GeometryError(format!("boundary: {}", e)))?;

        let mut targets = Vec::with_capacity(config.targets.len());
        for (i, entry) in config.targets.iter().enumerate() {
            let shape = common::parse_wkt_polygon(&entry.shape)
                .map_err(|e| SceneError::GeometryError(format!("targets[{}].shape: {}", i, e)))?;
            let path = common::parse_wkt_waypoints(&entry.path)
                .map_err(|e| SceneError::GeometryError(format!("targets[{}].path: {}", i, e)))?;
            targets.push(Target::new(shape, path, entry.velocity));
        }

        let mut obstacles = Vec::with_capacity(config.obstacles.len());
        for (i, entry) in config.obstacles.iter().enumerate() {
            let shape = common::parse_wkt_polygon(&entry.shape)
                .map_err(|e| SceneError::GeometryError(format!("obstacles[{}].shape: {}", i, e)))?;
            let path = common::parse_wkt_waypoints(&entry.path)
                .map_err(|e| SceneError::GeometryError(format!("obstacles[{}].path: {}", i, e)))?;
            obstacles.push(Obstacle::new(shape, path, entry.velocity));
        }

        let camera_fov = math_utils::deg_to_rad(config.camera_fov);
        let mut cameras = Vec::with_capacity(config.cameras.len());
        for (i, entry) in config.cameras.iter().enumerate() {
            let position = common::parse_wkt_point(&entry.pos)
                .map_err(|e| SceneError::GeometryError(format!("cameras[{}].pos: {}", i, e)))?;
            let angle = math_utils::deg_to_rad(entry.angle);
            cameras.push(Camera::new(
                position,
                angle,
                camera_fov,
                entry.max_velocity,
                entry.max_angular_velocity,
            ));
        }

        debug!(
            "シーンモデル構築: ターゲット{}体 / 障害物{}個 / カメラ{}台",
            targets.len(),
            obstacles.len(),
            cameras.len()
        );

        Ok(Self {
            boundary,
            targets,
            obstacles,
            camera_fov,
            cameras,
        })
    }
}
