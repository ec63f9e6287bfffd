use geo::{Coord, LineString, Point, Polygon};
use wkt::TryFromWkt;

/// ポリゴンを指定オフセットだけ平行移動した新しいポリゴンを返す
///
/// 外周の全頂点に `(offset.x, offset.y)` を加算します。頂点数と順序は
/// 入力のまま保持され、入力ポリゴンは変更されません。頂点が空の
/// ポリゴンに対しては空のポリゴンを返します。
pub fn translate(shape: &Polygon<f64>, offset: Point<f64>) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = shape
        .exterior()
        .coords()
        .map(|c| Coord {
            x: c.x + offset.x(),
            y: c.y + offset.y(),
        })
        .collect();
    Polygon::new(LineString::new(ring), vec![])
}

/// WKT文字列をポリゴンとして解析
///
/// # 引数
///
/// * `text` - `POLYGON((...))` 形式のWKT文字列
pub fn parse_wkt_polygon(text: &str) -> Result<Polygon<f64>, String> {
    Polygon::<f64>::try_from_wkt_str(text).map_err(|e| e.to_string())
}

/// WKT文字列を点として解析
///
/// # 引数
///
/// * `text` - `POINT(x y)` 形式のWKT文字列
pub fn parse_wkt_point(text: &str) -> Result<Point<f64>, String> {
    Point::<f64>::try_from_wkt_str(text).map_err(|e| e.to_string())
}

/// WKT文字列をウェイポイント列として解析
///
/// 経路は `LINESTRING` のほか `POLYGON` でも記述できるため、
/// まずラインストリングとして解析し、失敗した場合はポリゴンの
/// 外周をウェイポイント列として採用します。
pub fn parse_wkt_waypoints(text: &str) -> Result<LineString<f64>, String> {
    if let Ok(line) = LineString::<f64>::try_from_wkt_str(text) {
        return Ok(line);
    }
    let poly = Polygon::<f64>::try_from_wkt_str(text).map_err(|e| e.to_string())?;
    Ok(poly.exterior().clone())
}

/// 数学ユーティリティ関数
pub mod math_utils {
    /// 度をラジアンに変換
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * std::f64::consts::PI / 180.0
    }

    /// ラジアンを度に変換
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * 180.0 / std::f64::consts::PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon<f64> {
        parse_wkt_polygon("POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))").unwrap()
    }

    #[test]
    fn test_translate_round_trip() {
        let poly = square();
        let moved = translate(&poly, Point::new(3.5, -2.0));
        let back = translate(&moved, Point::new(-3.5, 2.0));
        assert_eq!(back, poly);
    }

    #[test]
    fn test_translate_zero_offset_is_identity() {
        let poly = square();
        assert_eq!(translate(&poly, Point::new(0.0, 0.0)), poly);
    }

    #[test]
    fn test_translate_preserves_vertex_count_and_order() {
        let poly = square();
        let moved = translate(&poly, Point::new(5.0, 5.0));
        assert_eq!(moved.exterior().0.len(), poly.exterior().0.len());
        assert_eq!(moved.exterior().0[1], Coord { x: 6.0, y: 4.0 });
    }

    #[test]
    fn test_translate_empty_polygon() {
        let empty = Polygon::new(LineString::new(vec![]), vec![]);
        let moved = translate(&empty, Point::new(1.0, 2.0));
        assert!(moved.exterior().0.is_empty());
    }

    #[test]
    fn test_parse_wkt_polygon() {
        let poly = parse_wkt_polygon("POLYGON((0 0,10 0,10 10,0 10,0 0))").unwrap();
        assert_eq!(poly.exterior().0.len(), 5);
        assert!(parse_wkt_polygon("POINT(1 2)").is_err());
        assert!(parse_wkt_polygon("not wkt at all").is_err());
    }

    #[test]
    fn test_parse_wkt_point() {
        let p = parse_wkt_point("POINT(3 -4)").unwrap();
        assert_eq!((p.x(), p.y()), (3.0, -4.0));
    }

    #[test]
    fn test_parse_wkt_waypoints_accepts_linestring_and_polygon() {
        let line = parse_wkt_waypoints("LINESTRING(5 5,6 6)").unwrap();
        assert_eq!(line.0.len(), 2);

        let ring = parse_wkt_waypoints("POLYGON((0 0,1 0,1 1,0 0))").unwrap();
        assert_eq!(ring.0.first(), Some(&Coord { x: 0.0, y: 0.0 }));
        assert!(parse_wkt_waypoints("LINESTRING(oops)").is_err());
    }

    #[test]
    fn test_deg_to_rad() {
        assert!((math_utils::deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((math_utils::rad_to_deg(std::f64::consts::PI) - 180.0).abs() < 1e-12);
    }
}
