use slidebound::container::PathContainer;
use slidebound::draw::{Shape, RED};

fn sample_line(x2: i32) -> Shape {
    Shape::Line { x1: 0, y1: 0, x2, y2: 10, color: RED, thick: 2.0 }
}

#[test]
fn add_remove_undo_redo_round_trips_through_public_api() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut container = PathContainer::new();

    let a = container.add_item(sample_line(10), 0.0);
    let b = container.add_item(sample_line(20), 1.0);
    assert_eq!(container.len(), 2);

    container.remove_item(a).unwrap();
    assert_eq!(container.len(), 1);
    assert!(container.get(a).is_none() || !container.get(a).unwrap().visible);

    container.undo().unwrap();
    assert_eq!(container.len(), 2);
    assert!(container.get(a).unwrap().visible);

    container.redo().unwrap();
    assert_eq!(container.len(), 1);

    assert!(container.get(b).is_some());
}

#[test]
fn undo_on_empty_history_reports_nothing_to_undo() {
    let mut container = PathContainer::new();
    let err = container.undo().unwrap_err();
    assert!(matches!(err, slidebound::EngineError::NothingToUndo));
}

#[test]
fn history_limit_evicts_oldest_undo_steps() {
    let mut container = PathContainer::new();
    container.set_history_limit(2);
    let ids: Vec<_> = (0..5).map(|i| container.add_item(sample_line(i), i as f64)).collect();

    // Only the two most recent adds can be undone; earlier steps were
    // trimmed, so a third undo has nothing left and returns an error.
    container.undo().unwrap();
    container.undo().unwrap();
    assert!(container.undo().is_err());
    assert!(ids.iter().all(|&id| container.get(id).is_some()));
}
