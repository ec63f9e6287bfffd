use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 移動エンティティ（ターゲット・障害物共通）の記述
#[derive(Debug, Deserialize, Serialize)]
pub struct MovingEntityConfig {
    /// 足あと形状（WKTポリゴン、ローカル座標系）
    pub shape: String,
    /// 計画経路（WKTラインストリングまたはポリゴン）
    pub path: String,
    /// 移動速度（m/s、省略時は1.0）
    #[serde(default = "default_velocity")]
    pub velocity: f64,
}

fn default_velocity() -> f64 {
    1.0
}

/// カメラの記述
#[derive(Debug, Deserialize, Serialize)]
pub struct CameraConfig {
    /// 設置位置（WKTポイント）
    pub pos: String,
    /// 視線方位（度）
    pub angle: f64,
    /// 最大移動速度（m/s）
    #[serde(rename = "maxVelocity")]
    pub max_velocity: f64,
    /// 最大角速度（rad/s）
    #[serde(rename = "maxAngularVelocity")]
    pub max_angular_velocity: f64,
}

/// シーン記述ファイル全体
///
/// 角度フィールドはすべて度で記述されます（ラジアンへの変換は
/// シーンモデル構築時に一度だけ行われます）。
#[derive(Debug, Deserialize, Serialize)]
pub struct SceneConfig {
    /// シーン境界（WKTポリゴン、必須）
    pub boundary: String,
    /// 全カメラ共通の視野半角（度、必須）
    #[serde(rename = "cameraFoV")]
    pub camera_fov: f64,
    /// 移動ターゲット（省略時は空）
    #[serde(default)]
    pub targets: Vec<MovingEntityConfig>,
    /// 移動障害物（省略時は空）
    #[serde(default)]
    pub obstacles: Vec<MovingEntityConfig>,
    /// 固定カメラ（省略時は空）
    #[serde(default)]
    pub cameras: Vec<CameraConfig>,
}

impl SceneConfig {
    /// シーン記述ファイルを読み込み
    ///
    /// YAMLとして解析します（YAMLはJSONの上位互換のため、JSON形式の
    /// シーンファイルもそのまま読み込めます）。
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();

        // ファイル存在チェック
        if !path.exists() {
            return Err(SceneError::FileNotFound(path.to_path_buf()));
        }

        // ファイル読み込み
        let contents = fs::read_to_string(path)
            .map_err(|e| SceneError::IoError(path.to_path_buf(), e))?;

        // 解析
        let config: SceneConfig = serde_yaml::from_str(&contents)
            .map_err(|e| SceneError::ParseError(path.to_path_buf(), e))?;

        // 基本的な検証
        config.validate()?;

        Ok(config)
    }

    /// 設定の基本的な検証
    ///
    /// 必須WKTフィールドの空文字列を欠落として扱います。ジオメトリ自体の
    /// 妥当性（巻き方向や自己交差）は検証しません。
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.boundary.trim().is_empty() {
            return Err(SceneError::ValidationError(
                "boundary must not be empty".to_string(),
            ));
        }

        for (i, entry) in self.targets.iter().enumerate() {
            if entry.shape.trim().is_empty() {
                return Err(SceneError::ValidationError(format!(
                    "targets[{}].shape must not be empty",
                    i
                )));
            }
            if entry.path.trim().is_empty() {
                return Err(SceneError::ValidationError(format!(
                    "targets[{}].path must not be empty",
                    i
                )));
            }
        }

        for (i, entry) in self.obstacles.iter().enumerate() {
            if entry.shape.trim().is_empty() {
                return Err(SceneError::ValidationError(format!(
                    "obstacles[{}].shape must not be empty",
                    i
                )));
            }
            if entry.path.trim().is_empty() {
                return Err(SceneError::ValidationError(format!(
                    "obstacles[{}].path must not be empty",
                    i
                )));
            }
        }

        for (i, entry) in self.cameras.iter().enumerate() {
            if entry.pos.trim().is_empty() {
                return Err(SceneError::ValidationError(format!(
                    "cameras[{}].pos must not be empty",
                    i
                )));
            }
        }

        Ok(())
    }

    /// シーンの概要を表示
    pub fn print_summary(&self) {
        println!("=== シーン情報 ===");
        println!("視野半角: {:.1}度（全カメラ共通）", self.camera_fov);
        println!("ターゲット: {}体", self.targets.len());
        println!("障害物: {}個", self.obstacles.len());
        println!("カメラ: {}台", self.cameras.len());

        for (i, entry) in self.targets.iter().enumerate() {
            println!("  targets[{}]: {} m/s", i, entry.velocity);
        }
        for (i, entry) in self.obstacles.iter().enumerate() {
            println!("  obstacles[{}]: {} m/s", i, entry.velocity);
        }
        for (i, entry) in self.cameras.iter().enumerate() {
            println!("  cameras[{}]: 方位 {}度 @ {}", i, entry.angle, entry.pos);
        }
    }
}

/// シーン読み込みエラー
#[derive(Debug)]
pub enum SceneError {
    FileNotFound(std::path::PathBuf),
    IoError(std::path::PathBuf, std::io::Error),
    ParseError(std::path::PathBuf, serde_yaml::Error),
    GeometryError(String),
    ValidationError(String),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::FileNotFound(path) => {
                write!(f, "シーン記述ファイルが見つかりません: {}", path.display())
            }
            SceneError::IoError(path, err) => {
                write!(f, "ファイル読み込みエラー {}: {}", path.display(), err)
            }
            SceneError::ParseError(path, err) => {
                write!(f, "シーン記述の解析エラー {}: {}", path.display(), err)
            }
            SceneError::GeometryError(msg) => {
                write!(f, "ジオメトリ解析エラー: {}", msg)
            }
            SceneError::ValidationError(msg) => {
                write!(f, "設定検証エラー: {}", msg)
            }
        }
    }
}

impl std::error::Error for SceneError {}
