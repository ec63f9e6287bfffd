use crate::canvas::SvgCanvas;

/// 描画可能なシーンエンティティの基本インターフェース
pub trait IDrawable {
    /// キャンバスへ自身の形状と注記を描画
    fn draw(&self, canvas: &mut SvgCanvas);

    /// エンティティ種別名の取得（ログ出力用）
    fn kind(&self) -> &'static str;
}
