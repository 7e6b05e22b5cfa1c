use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains_span(Span::new(12, 20)));
    assert!(!span.contains_span(Span::new(12, 21)));
}

#[test]
fn test_span_merge() {
    let a = Span::new(10, 20);
    let b = Span::new(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_span_points() {
    let span = Span::new(4, 9);
    assert_eq!(span.start_point(), Span::new(4, 4));
    assert_eq!(span.end_point(), Span::new(9, 9));
    assert!(Span::point(7).is_empty());
}

#[test]
fn test_span_debug() {
    assert_eq!(format!("{:?}", Span::new(3, 8)), "3..8");
}
