use gex_chart_wasm::domain::chart::{
    DeviceClass, GestureRouter, PointerInput, ViewportController, ViewportLimits, ViewportMode,
};
use quickcheck_macros::quickcheck;

const HEIGHT: f64 = 500.0;

fn ready_controller() -> ViewportController {
    let mut vc = ViewportController::new(ViewportLimits::default(), 10);
    vc.initialize(1_000.0, 2_000.0, 0.0, 10);
    vc
}

#[test]
fn drag_pans_relative_to_anchor_without_drift() {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Mouse);

    router.handle(PointerInput::MouseDown { coordinate: 100.0 }, &mut vc);
    for y in (101..=150).map(f64::from) {
        router.handle(PointerInput::Move { coordinate: y, surface_height_px: HEIGHT }, &mut vc);
    }
    // 50px of a 1000-wide domain on a 500px surface
    assert_eq!(vc.viewport().domain_min, 1_100.0);
    assert_eq!(vc.viewport().domain_max, 2_100.0);

    // back to the anchor restores the anchor domain exactly
    router.handle(PointerInput::Move { coordinate: 100.0, surface_height_px: HEIGHT }, &mut vc);
    assert_eq!(vc.viewport().domain_min, 1_000.0);
    assert_eq!(vc.viewport().domain_max, 2_000.0);
    assert_eq!(vc.mode(), ViewportMode::UserAdjusted);
}

#[test]
fn move_without_session_does_nothing() {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Mouse);
    assert!(!router.handle(PointerInput::Move { coordinate: 300.0, surface_height_px: HEIGHT }, &mut vc));
    assert_eq!(vc.mode(), ViewportMode::Tracking);
}

#[test]
fn second_drag_start_is_rejected() {
    let vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Mouse);
    assert!(router.drag_start(10.0, &vc));
    assert!(!router.drag_start(40.0, &vc));
    assert_eq!(router.session().map(|s| s.anchor_pointer_coordinate), Some(10.0));
}

#[test]
fn drag_needs_an_initialized_viewport() {
    let vc = ViewportController::new(ViewportLimits::default(), 10);
    let mut router = GestureRouter::new(DeviceClass::Touch);
    assert!(!router.drag_start(10.0, &vc));
    assert!(!router.is_dragging());
}

#[test]
fn end_and_leave_close_the_session() {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Mouse);

    router.handle(PointerInput::MouseDown { coordinate: 0.0 }, &mut vc);
    router.handle(PointerInput::End, &mut vc);
    assert!(!router.is_dragging());

    router.handle(PointerInput::MouseDown { coordinate: 0.0 }, &mut vc);
    router.handle(PointerInput::Leave, &mut vc);
    assert!(!router.is_dragging());
}

#[test]
fn wheel_zooms_on_mouse_surfaces() {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Mouse);

    assert!(router.handle(PointerInput::Wheel { delta_y: -120.0 }, &mut vc));
    assert!((vc.viewport().range() - 800.0).abs() < 1e-9);
    assert!(router.handle(PointerInput::Wheel { delta_y: 120.0 }, &mut vc));
    assert!((vc.viewport().range() - 1_000.0).abs() < 1e-9);
    assert!((vc.viewport().center() - 1_500.0).abs() < 1e-9);
}

#[test]
fn wheel_is_ignored_on_touch_surfaces() {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Touch);
    let before = vc.viewport().clone();

    assert!(!router.handle(PointerInput::Wheel { delta_y: -120.0 }, &mut vc));
    assert_eq!(vc.viewport(), &before);
}

#[test]
fn only_single_finger_starts_a_touch_drag() {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Touch);

    router.handle(PointerInput::TouchStart { coordinate: 10.0, touches: 2 }, &mut vc);
    assert!(!router.is_dragging());

    router.handle(PointerInput::TouchStart { coordinate: 10.0, touches: 1 }, &mut vc);
    assert!(router.is_dragging());
    assert_eq!(router.session().map(|s| s.device_class), Some(DeviceClass::Touch));
}

#[test]
fn zero_height_surface_is_ignored() {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Mouse);
    router.handle(PointerInput::MouseDown { coordinate: 0.0 }, &mut vc);
    assert!(!router.handle(PointerInput::Move { coordinate: 50.0, surface_height_px: 0.0 }, &mut vc));
    assert_eq!(vc.viewport().domain_min, 1_000.0);
}

#[test]
fn device_classification() {
    assert_eq!(DeviceClass::classify(5, 400.0, 768.0), DeviceClass::Touch);
    assert_eq!(DeviceClass::classify(5, 1_280.0, 768.0), DeviceClass::Mouse);
    assert_eq!(DeviceClass::classify(0, 400.0, 768.0), DeviceClass::Mouse);
}

#[quickcheck]
fn pan_depends_only_on_last_pointer_position(moves: Vec<i16>, last: i16) -> bool {
    let mut vc = ready_controller();
    let mut router = GestureRouter::new(DeviceClass::Touch);
    router.handle(PointerInput::TouchStart { coordinate: 0.0, touches: 1 }, &mut vc);
    for y in moves {
        router.handle(PointerInput::Move { coordinate: f64::from(y), surface_height_px: HEIGHT }, &mut vc);
    }
    router.handle(PointerInput::Move { coordinate: f64::from(last), surface_height_px: HEIGHT }, &mut vc);

    let expected = f64::from(last) * 2.0;
    let vp = vc.viewport();
    (vp.domain_min - (1_000.0 + expected)).abs() < 1e-6 && (vp.range() - 1_000.0).abs() < 1e-6
}
