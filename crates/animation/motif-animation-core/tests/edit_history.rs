use motif_animation_core::{
    AnimationError, AnimationStore, Canvas, Config, Editor, HistoryDirection, Keyframe, Shape,
    ShapeKind,
};

fn shape(key: &str) -> Shape {
    Shape::builder(key, ShapeKind::Ellipse)
        .size(5.0, 5.0)
        .color(10.0, 20.0, 30.0)
        .build()
        .unwrap()
}

fn kf(key: &str, t: f64) -> Keyframe {
    Keyframe::new(t, shape(key)).unwrap()
}

/// Applies edit number `i` of a fixed sequence.
fn edit(ed: &mut Editor, i: usize) {
    match i % 3 {
        0 => ed.add_shape(shape(&format!("s{i}"))).unwrap(),
        1 => ed.add_keyframe(&format!("s{}", i - 1), kf(&format!("s{}", i - 1), i as f64)).unwrap(),
        _ => ed
            .set_canvas(Canvas::new(0, 0, 100 + i as i32, 100).unwrap())
            .unwrap(),
    }
}

#[test]
fn undo_n_times_returns_to_the_start() {
    for n in [0usize, 1, 3] {
        let mut ed = Editor::default();
        let start = ed.store().make_copy();
        for i in 0..n {
            edit(&mut ed, i);
        }
        for _ in 0..n {
            ed.undo().unwrap();
        }
        assert_eq!(ed.store(), &start, "n={n}");
        assert_eq!(
            ed.undo(),
            Err(AnimationError::NoHistory {
                direction: HistoryDirection::Undo
            })
        );
    }
}

#[test]
fn redo_replays_undone_edits() {
    let mut ed = Editor::default();
    for i in 0..3 {
        edit(&mut ed, i);
    }
    let done = ed.store().make_copy();
    ed.undo().unwrap();
    ed.undo().unwrap();
    ed.redo().unwrap();
    ed.redo().unwrap();
    assert_eq!(ed.store(), &done);
    assert!(!ed.can_redo());
}

#[test]
fn new_edit_clears_redo() {
    let mut ed = Editor::default();
    ed.add_shape(shape("a")).unwrap();
    ed.add_shape(shape("b")).unwrap();
    ed.undo().unwrap();
    assert!(ed.can_redo());

    ed.add_shape(shape("c")).unwrap();
    assert!(!ed.can_redo());
    assert!(matches!(
        ed.redo(),
        Err(AnimationError::NoHistory {
            direction: HistoryDirection::Redo
        })
    ));
    let keys: Vec<&str> = ed.store().shapes().map(Shape::key).collect();
    assert_eq!(keys, vec!["a", "c"]);
}

#[test]
fn motions_and_replacements_undo_as_single_steps() {
    let mut ed = Editor::default();
    ed.add_shape(shape("m")).unwrap();
    ed.add_motion("m", kf("m", 0.0), kf("m", 10.0)).unwrap();
    assert_eq!(ed.store().timeline("m").unwrap().len(), 2);

    let moved = Keyframe::new(12.0, shape("m")).unwrap();
    let old = ed.replace_keyframe("m", 10.0, moved).unwrap();
    assert_eq!(old.time(), 10.0);
    assert_eq!(ed.store().end_time(), 12.0);

    ed.undo().unwrap();
    assert_eq!(ed.store().end_time(), 10.0);
    ed.undo().unwrap();
    assert!(ed.store().timeline("m").unwrap().is_empty());
}

#[test]
fn config_caps_history_depth() {
    let cfg = Config {
        history_limit: Some(1),
        ..Config::default()
    };
    let mut ed = Editor::from_config(&cfg);
    ed.add_shape(shape("a")).unwrap();
    ed.add_shape(shape("b")).unwrap();
    ed.undo().unwrap();
    assert!(ed.undo().is_err());
    assert_eq!(ed.store().len(), 1);

    let store: AnimationStore = ed.into_store();
    assert!(store.contains("a"));
}
