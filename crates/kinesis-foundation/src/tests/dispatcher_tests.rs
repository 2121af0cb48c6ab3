use super::*;
use crate::gestures::GestureState;
use kinesis_core::{CallbackHandle, NodeKind, Rect, SceneTree};
use std::cell::RefCell;
use std::rc::Rc;

struct Scene {
    tree: SceneTree,
    root: NodeId,
    scroll: NodeId,
    row: NodeId,
    button: NodeId,
}

/// Root 400x800 holding a scroll container (0,0,400,400) with one row at
/// content y=60, and a plain button at (0,500,100,50).
fn scene() -> Scene {
    let mut tree = SceneTree::new();
    let root = tree.create_node(NodeKind::View);
    let scroll = tree.create_node(NodeKind::Scroll);
    let row = tree.create_node(NodeKind::View);
    let button = tree.create_node(NodeKind::View);
    tree.set_root(root).unwrap();
    tree.append_child(root, scroll).unwrap();
    tree.append_child(scroll, row).unwrap();
    tree.append_child(root, button).unwrap();
    tree.set_frame(root, Rect::new(0.0, 0.0, 400.0, 800.0)).unwrap();
    tree.set_frame(scroll, Rect::new(0.0, 0.0, 400.0, 400.0)).unwrap();
    tree.set_frame(row, Rect::new(0.0, 60.0, 400.0, 20.0)).unwrap();
    tree.set_frame(button, Rect::new(0.0, 500.0, 100.0, 50.0)).unwrap();
    tree.update_absolute_layout();
    tree.node_mut(row).unwrap().touchable = true;
    tree.node_mut(button).unwrap().touchable = true;
    Scene {
        tree,
        root,
        scroll,
        row,
        button,
    }
}

type Presses = Rc<RefCell<Vec<PressEventKind>>>;

fn record_presses(
    dispatcher: &mut TouchDispatcher,
    node: NodeId,
    kinds: &[PressEventKind],
) -> (Presses, Vec<CallbackHandle<()>>) {
    let presses: Presses = Rc::default();
    let handles = kinds
        .iter()
        .map(|kind| {
            let kind = *kind;
            let presses = presses.clone();
            let handle = CallbackHandle::new(move |()| presses.borrow_mut().push(kind));
            dispatcher.set_press_callback(node, kind, handle.callback());
            handle
        })
        .collect();
    (presses, handles)
}

const ALL_PRESSES: [PressEventKind; 4] = [
    PressEventKind::PressIn,
    PressEventKind::PressOut,
    PressEventKind::Press,
    PressEventKind::LongPress,
];

#[test]
fn hit_test_translates_into_scroll_content_space() {
    let mut scene = scene();
    scene.tree.node_mut(scene.scroll).unwrap().scroll_y = 50.0;
    let dispatcher = TouchDispatcher::new();

    assert_eq!(
        dispatcher.hit_test(&scene.tree, Point::new(10.0, 10.0)),
        Some(scene.row)
    );
    assert_eq!(dispatcher.hit_test(&scene.tree, Point::new(10.0, 70.0)), None);
}

#[test]
fn hit_test_prefers_topmost_child_and_skips_hidden() {
    let mut scene = scene();
    let overlay = scene.tree.create_node(NodeKind::View);
    scene.tree.append_child(scene.root, overlay).unwrap();
    scene
        .tree
        .set_frame(overlay, Rect::new(0.0, 480.0, 200.0, 100.0))
        .unwrap();
    scene.tree.update_absolute_layout();
    scene.tree.node_mut(overlay).unwrap().touchable = true;
    let dispatcher = TouchDispatcher::new();

    assert_eq!(
        dispatcher.hit_test(&scene.tree, Point::new(50.0, 520.0)),
        Some(overlay)
    );

    scene.tree.node_mut(overlay).unwrap().visible = false;
    assert_eq!(
        dispatcher.hit_test(&scene.tree, Point::new(50.0, 520.0)),
        Some(scene.button)
    );

    scene.tree.node_mut(scene.button).unwrap().display_none = true;
    assert_eq!(dispatcher.hit_test(&scene.tree, Point::new(50.0, 520.0)), None);
}

#[test]
fn hit_test_bounds_are_inclusive() {
    let scene = scene();
    let dispatcher = TouchDispatcher::new();

    assert_eq!(
        dispatcher.hit_test(&scene.tree, Point::new(100.0, 550.0)),
        Some(scene.button)
    );
    assert_eq!(dispatcher.hit_test(&scene.tree, Point::new(100.1, 550.0)), None);
}

#[test]
fn nodes_with_callbacks_or_gestures_are_targets() {
    let mut scene = scene();
    scene.tree.node_mut(scene.button).unwrap().touchable = false;
    let mut dispatcher = TouchDispatcher::new();
    assert_eq!(dispatcher.hit_test(&scene.tree, Point::new(10.0, 510.0)), None);

    let gesture = dispatcher.attach_gesture(scene.button, GestureType::Tap);
    assert_eq!(
        dispatcher.hit_test(&scene.tree, Point::new(10.0, 510.0)),
        Some(scene.button)
    );

    dispatcher.detach_gesture(gesture).unwrap();
    assert_eq!(dispatcher.hit_test(&scene.tree, Point::new(10.0, 510.0)), None);

    let (_presses, _handles) =
        record_presses(&mut dispatcher, scene.button, &[PressEventKind::Press]);
    assert_eq!(
        dispatcher.hit_test(&scene.tree, Point::new(10.0, 510.0)),
        Some(scene.button)
    );
}

#[test]
fn quick_release_fires_press_in_out_and_press() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(&mut dispatcher, scene.button, &ALL_PRESSES);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 1, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::moved(14.0, 514.0, 1, 50.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(14.0, 514.0, 1, 100.0));

    assert_eq!(
        *presses.borrow(),
        vec![
            PressEventKind::PressIn,
            PressEventKind::PressOut,
            PressEventKind::Press
        ]
    );
    assert!(!dispatcher.has_active_touches());
}

#[test]
fn long_hold_prefers_long_press_and_falls_back_to_press() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(&mut dispatcher, scene.button, &ALL_PRESSES);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 1, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(10.0, 510.0, 1, 500.0));
    assert_eq!(presses.borrow().last(), Some(&PressEventKind::LongPress));

    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(
        &mut dispatcher,
        scene.button,
        &[PressEventKind::Press],
    );
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 1, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(10.0, 510.0, 1, 900.0));
    assert_eq!(*presses.borrow(), vec![PressEventKind::Press]);
}

#[test]
fn moving_past_slop_abandons_press() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(&mut dispatcher, scene.button, &ALL_PRESSES);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 1, 0.0));
    // Exactly 10 units is still within the slop.
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::moved(16.0, 518.0, 1, 10.0));
    assert_eq!(*presses.borrow(), vec![PressEventKind::PressIn]);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::moved(21.0, 510.0, 1, 20.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(10.0, 510.0, 1, 30.0));

    assert_eq!(
        *presses.borrow(),
        vec![PressEventKind::PressIn, PressEventKind::PressOut]
    );
}

#[test]
fn release_outside_bounds_only_presses_out() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(&mut dispatcher, scene.button, &ALL_PRESSES);

    // Starts on the right edge, ends just past it without exceeding the slop.
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(99.0, 510.0, 1, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(105.0, 510.0, 1, 50.0));

    assert_eq!(
        *presses.borrow(),
        vec![PressEventKind::PressIn, PressEventKind::PressOut]
    );
}

#[test]
fn release_bounds_follow_scroll_offset() {
    let mut scene = scene();
    scene.tree.node_mut(scene.scroll).unwrap().scroll_y = 50.0;
    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(&mut dispatcher, scene.row, &ALL_PRESSES);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 15.0, 1, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(10.0, 18.0, 1, 40.0));

    assert_eq!(presses.borrow().last(), Some(&PressEventKind::Press));
}

#[test]
fn cancel_only_presses_out() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(&mut dispatcher, scene.button, &ALL_PRESSES);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 1, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::cancelled(10.0, 510.0, 1, 50.0));

    assert_eq!(
        *presses.borrow(),
        vec![PressEventKind::PressIn, PressEventKind::PressOut]
    );
}

#[test]
fn captured_pointer_keeps_routing_outside_the_node() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let pan = dispatcher.attach_gesture(scene.button, GestureType::Pan);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 3, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::moved(300.0, 700.0, 3, 16.0));
    assert_eq!(
        dispatcher.gesture(pan).map(|g| g.state()),
        Some(GestureState::Changed)
    );
    assert!(dispatcher.has_active_touches());

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(300.0, 700.0, 3, 32.0));
    assert_eq!(
        dispatcher.gesture(pan).map(|g| g.state()),
        Some(GestureState::Ended)
    );
    assert!(!dispatcher.has_active_touches());
}

#[test]
fn every_recognizer_on_the_node_sees_the_touch() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let pan = dispatcher.attach_gesture(scene.button, GestureType::Pan);
    let tap = dispatcher.attach_gesture(scene.button, GestureType::Tap);
    assert_eq!(dispatcher.gestures_for(scene.button), &[pan, tap]);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 1, 0.0));
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::moved(40.0, 510.0, 1, 20.0));

    assert_eq!(dispatcher.gesture(pan).unwrap().state(), GestureState::Changed);
    assert_eq!(dispatcher.gesture(tap).unwrap().state(), GestureState::Failed);
}

#[test]
fn host_surface_validates_names_and_ids() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();

    assert_eq!(
        dispatcher.attach_gesture_by_name(scene.button, "swipe"),
        Err(InputError::UnknownGestureType {
            name: "swipe".to_owned()
        })
    );
    let id = dispatcher
        .attach_gesture_by_name(scene.button, "tap")
        .unwrap();

    let handle = CallbackHandle::new(|_: GestureEvent| {});
    assert!(matches!(
        dispatcher.set_gesture_callback(id, "onFling", handle.callback()),
        Err(InputError::UnknownEvent { .. })
    ));
    assert!(dispatcher
        .set_gesture_config(id, "numberOfTaps", &ConfigValue::Number(2.0))
        .is_ok());
    assert!(matches!(
        dispatcher.set_gesture_config(GestureId(99), "numberOfTaps", &ConfigValue::Number(2.0)),
        Err(InputError::MissingGesture { .. })
    ));

    let press = CallbackHandle::new(|()| {});
    assert!(dispatcher
        .set_press_callback_by_name(scene.button, "onHover", press.callback())
        .is_err());
}

#[test]
fn remove_node_drops_gestures_and_presses() {
    let scene = scene();
    let mut dispatcher = TouchDispatcher::new();
    let (presses, _handles) = record_presses(&mut dispatcher, scene.button, &ALL_PRESSES);
    let pan = dispatcher.attach_gesture(scene.button, GestureType::Pan);

    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::began(10.0, 510.0, 1, 0.0));
    dispatcher.remove_node(scene.button);
    dispatcher.dispatch_touch(&scene.tree, &TouchEvent::ended(10.0, 510.0, 1, 50.0));

    assert!(dispatcher.gesture(pan).is_none());
    assert!(dispatcher.gestures_for(scene.button).is_empty());
    assert!(!dispatcher.has_active_touches());
    assert_eq!(*presses.borrow(), vec![PressEventKind::PressIn]);
}
