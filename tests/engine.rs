use reveal::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn window() -> Window {
    Window::new(&EngineConfig::default())
}

/// A section root at the top of the document with one child per bounds entry
fn section(window: &Window, children: &[Rect]) -> (ElementId, Vec<ElementId>) {
    let mut tree = window.tree_mut();
    let root = tree.create_element(None, "section");
    tree.set_bounds(root, Rect::new(0.0, 0.0, 1440.0, 3000.0));
    let ids = children
        .iter()
        .map(|bounds| {
            let id = tree.create_element(Some(root), "div");
            tree.add_class(id, "item");
            tree.set_bounds(id, *bounds);
            id
        })
        .collect();
    (root, ids)
}

fn opacity(window: &Window, id: ElementId) -> Option<f32> {
    window
        .tree()
        .style(id, Property::Opacity)
        .and_then(PropertyValue::as_number)
}

fn fade(targets: &[ElementId], stagger_ms: f32) -> Timeline {
    build(
        targets,
        vec![PropertySpec::new(Property::Opacity, 0.0, 1.0)
            .duration(500.0)
            .timing(TimingFunction::Linear)],
        stagger_ms,
    )
    .unwrap()
}

#[test]
fn test_staggered_duration() {
    let window = window();
    let (_, items) = section(&window, &[Rect::new(0.0, 0.0, 10.0, 10.0); 3]);
    let timeline = fade(&items, 100.0);
    assert_eq!(timeline.duration_ms(), 700.0);
    assert_eq!(timeline.tracks().len(), 3);
    assert_eq!(timeline.target_end_ms(items[0]), Some(500.0));
    assert_eq!(timeline.target_end_ms(items[2]), Some(700.0));
}

#[test]
fn test_built_timeline_reverts_on_remove() {
    init_logging();
    let window = window();
    let (root, items) = section(&window, &[Rect::new(0.0, 0.0, 10.0, 10.0)]);
    window
        .tree_mut()
        .set_style(items[0], Property::Opacity, PropertyValue::Number(0.4));

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    let bound = ctx.animate(fade(&items, 0.0), Trigger::on_mount(0.0)).unwrap();
    assert_eq!(opacity(&window, items[0]), Some(0.0));

    window.frame(600.0);
    assert_eq!(opacity(&window, items[0]), Some(1.0));

    assert!(ctx.remove(bound.timeline()));
    assert_eq!(opacity(&window, items[0]), Some(0.4));
    assert!(!window.has_listeners());
}

#[test]
fn test_play_once_enters_and_exits() {
    init_logging();
    let window = window();
    // Top edge reaches the top of the viewport at 100px, bottom at 400px
    let (root, items) = section(
        &window,
        &[Rect::new(0.0, 100.0, 800.0, 300.0), Rect::new(0.0, 120.0, 10.0, 10.0)],
    );
    let (reference, target) = (items[0], items[1]);

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    let bound = ctx
        .animate(
            fade(&[target], 0.0),
            Trigger::on_scroll(reference, "top top", None, TriggerMode::PlayOnce).unwrap(),
        )
        .unwrap();

    window.frame(16.0);
    let playback = ctx.playback(bound).unwrap();
    assert_eq!(playback.state, PlaybackState::Idle);
    assert_eq!(opacity(&window, target), Some(0.0));

    window.scroll_to(150.0);
    window.frame(16.0);
    assert_eq!(ctx.playback(bound).unwrap().state, PlaybackState::Entering);

    window.frame(600.0);
    let playback = ctx.playback(bound).unwrap();
    assert_eq!(playback.state, PlaybackState::Entered);
    assert_eq!(playback.forward_plays, 1);
    assert_eq!(opacity(&window, target), Some(1.0));

    // Scrolling further inside the range does not replay
    window.scroll_to(300.0);
    window.frame(16.0);
    assert_eq!(ctx.playback(bound).unwrap().state, PlaybackState::Entered);

    window.scroll_to(50.0);
    window.frame(16.0);
    assert_eq!(ctx.playback(bound).unwrap().state, PlaybackState::Exiting);

    window.frame(600.0);
    let playback = ctx.playback(bound).unwrap();
    assert_eq!(playback.state, PlaybackState::Idle);
    assert_eq!(playback.forward_plays, 1);
    assert_eq!(playback.reverse_plays, 1);
    assert_eq!(opacity(&window, target), Some(0.0));
}

#[test]
fn test_scroll_past_range_and_back_plays_each_way_once() {
    let window = window();
    let (root, items) = section(&window, &[Rect::new(0.0, 100.0, 800.0, 300.0)]);

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    let bound = ctx
        .animate(
            fade(&items, 0.0),
            Trigger::on_scroll(items[0], "top top", None, TriggerMode::PlayOnce).unwrap(),
        )
        .unwrap();

    window.frame(16.0);
    for offset in [500.0, 0.0] {
        window.scroll_to(offset);
        for _ in 0..40 {
            window.frame(16.0);
        }
    }

    let playback = ctx.playback(bound).unwrap();
    assert_eq!(playback.forward_plays, 1);
    assert_eq!(playback.reverse_plays, 1);
    assert_eq!(playback.state, PlaybackState::Idle);
    assert_eq!(playback.progress, 0.0);
}

#[test]
fn test_scrub_follows_scroll() {
    let window = window();
    let (root, items) = section(&window, &[Rect::new(0.0, 100.0, 800.0, 300.0)]);

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    let bound = ctx
        .animate(
            fade(&items, 0.0),
            Trigger::on_scroll(items[0], "top top", None, TriggerMode::SCRUB).unwrap(),
        )
        .unwrap();

    window.scroll_to(250.0);
    window.frame(16.0);
    let playback = ctx.playback(bound).unwrap();
    assert_eq!(playback.state, PlaybackState::Scrubbing);
    assert!((playback.progress - 0.5).abs() < 1e-6);
    assert!((opacity(&window, items[0]).unwrap() - 0.5).abs() < 1e-6);

    window.scroll_to(1000.0);
    window.frame(16.0);
    assert_eq!(ctx.playback(bound).unwrap().progress, 1.0);
}

#[test]
fn test_dispose_mid_flight_stops_all_writes() {
    init_logging();
    let window = window();
    let (root, items) = section(
        &window,
        &[Rect::new(0.0, 100.0, 800.0, 300.0), Rect::new(0.0, 500.0, 10.0, 10.0)],
    );

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    ctx.animate(
        fade(&[items[0]], 0.0),
        Trigger::on_scroll(items[0], "top top", None, TriggerMode::PlayOnce).unwrap(),
    )
    .unwrap();
    ctx.animate(fade(&[items[1]], 0.0), Trigger::on_mount(0.0))
        .unwrap();
    assert_eq!(window.listener_count(), 2);

    window.scroll_to(150.0);
    window.frame(100.0);
    assert!(opacity(&window, items[0]).unwrap() > 0.0);

    ctx.dispose();
    assert!(ctx.is_disposed());
    assert_eq!(window.listener_count(), 0);
    assert_eq!(opacity(&window, items[0]), None);
    assert_eq!(opacity(&window, items[1]), None);

    let mutations = window.tree().mutations();
    for offset in [50.0, 200.0, 350.0, 0.0] {
        window.scroll_to(offset);
        window.frame(16.0);
    }
    assert_eq!(window.tree().mutations(), mutations);

    assert!(matches!(
        ctx.animate(fade(&items, 0.0), Trigger::on_mount(0.0)),
        Err(RevealError::ContextDisposed)
    ));
}

#[test]
fn test_missing_reference_cancels_only_its_binding() {
    init_logging();
    let window = window();
    let (root, items) = section(
        &window,
        &[
            Rect::new(0.0, 100.0, 800.0, 300.0),
            Rect::new(0.0, 100.0, 800.0, 300.0),
            Rect::new(0.0, 900.0, 10.0, 10.0),
            Rect::new(0.0, 900.0, 10.0, 10.0),
        ],
    );
    let (doomed, survivor) = (items[0], items[1]);

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    ctx.animate(
        fade(&[items[2]], 0.0),
        Trigger::on_scroll(doomed, "top top", None, TriggerMode::PlayOnce).unwrap(),
    )
    .unwrap();
    let kept = ctx
        .animate(
            fade(&[items[3]], 0.0),
            Trigger::on_scroll(survivor, "top top", None, TriggerMode::PlayOnce).unwrap(),
        )
        .unwrap();

    assert!(window.tree_mut().remove(doomed));
    window.scroll_to(150.0);
    let stats = window.frame(16.0);
    assert_eq!(stats.failed, 1);
    assert_eq!(window.listener_count(), 1);
    assert_eq!(ctx.playback(kept).unwrap().state, PlaybackState::Entering);

    window.frame(600.0);
    assert_eq!(ctx.playback(kept).unwrap().state, PlaybackState::Entered);
    assert_eq!(opacity(&window, items[3]), Some(1.0));
    assert_eq!(opacity(&window, items[2]), Some(0.0));
}

#[test]
fn test_bind_to_removed_reference_fails() {
    let window = window();
    let (root, items) = section(
        &window,
        &[Rect::new(0.0, 100.0, 800.0, 300.0), Rect::new(0.0, 900.0, 10.0, 10.0)],
    );
    let (reference, target) = (items[0], items[1]);

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    let handle = ctx.add(fade(&[target], 0.0)).unwrap();
    assert!(window.tree_mut().remove(reference));

    let result = ctx.bind(
        handle,
        Trigger::on_scroll(reference, "top top", None, TriggerMode::PlayOnce).unwrap(),
    );
    assert!(matches!(
        result,
        Err(RevealError::MissingReferenceElement(id)) if id == reference
    ));
    assert_eq!(window.listener_count(), 0);
    assert_eq!(ctx.binding_count(), 0);
    // Nothing was written for the failed binding
    assert_eq!(opacity(&window, target), None);
}

#[test]
fn test_same_timeline_bound_twice_plays_independently() {
    let window = window();
    let (root, items) = section(&window, &[Rect::new(0.0, 0.0, 10.0, 10.0)]);

    let mut ctx = AnimationContext::open(&window, root).unwrap();
    let handle = ctx.add(fade(&items, 0.0)).unwrap();
    let first = ctx.bind(handle, Trigger::on_mount(0.0)).unwrap();
    let second = ctx.bind(handle, Trigger::on_mount(250.0)).unwrap();
    assert_ne!(first, second);
    assert_eq!(window.listener_count(), 2);

    window.frame(500.0);
    assert_eq!(ctx.playback(first).unwrap().state, PlaybackState::Entered);
    let late = ctx.playback(second).unwrap();
    assert_eq!(late.state, PlaybackState::Entering);
    assert!((late.progress - 0.5).abs() < 1e-6);
    assert_eq!(window.listener_count(), 1);

    window.frame(250.0);
    assert_eq!(ctx.playback(second).unwrap().state, PlaybackState::Entered);
    assert!(!window.has_listeners());
}

#[test]
fn test_mismatched_templates_fail_to_build() {
    let window = window();
    let (_, items) = section(&window, &[Rect::new(0.0, 0.0, 10.0, 10.0)]);
    let result = build(
        &items,
        vec![PropertySpec::new(Property::Filter, "blur(20px)", "brightness(1) blur(0px)")],
        0.0,
    );
    assert!(matches!(result, Err(RevealError::IncompatibleValues { .. })));
}
