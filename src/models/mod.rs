// 基本的なジオメトリ操作とWKT・数学ユーティリティ
pub mod common;

// 描画インターフェース（trait）定義
pub mod traits;

// 各シーンエンティティの実装
pub mod camera;
pub mod obstacle;
pub mod target;
pub mod world;

// 便利な re-export
pub use camera::Camera;
pub use common::*;
pub use obstacle::Obstacle;
pub use target::Target;
pub use traits::*;
pub use world::Scene;
