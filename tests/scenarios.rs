//! End-to-end decoding scenarios through `ControllerService`.

use daydream_controller::infrastructure::bluetooth::protocol::MOTION_FRAME_LEN;
use daydream_controller::{
    AppEvent, ChannelObserver, ControllerService, ControllerSnapshot, Quaternion, ServiceConfig,
    TouchPosition, Vec3,
};
use std::sync::Arc;

fn service_with_events() -> (
    ControllerService,
    tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
) {
    let (observer, rx) = ChannelObserver::channel();
    let service = ControllerService::with_observer(ServiceConfig::default(), Arc::new(observer));
    (service, rx)
}

fn buttons_frame() -> [u8; MOTION_FRAME_LEN] {
    let mut frame = [0u8; MOTION_FRAME_LEN];
    frame[18] = 0b0001_1111;
    frame
}

fn assert_no_button_edges(snapshot: &ControllerSnapshot) {
    for (name, edge) in snapshot.edges.iter().skip(1) {
        assert!(!edge.up, "{name}_up must be false");
        assert!(!edge.down, "{name}_down must be false");
    }
}

#[test]
fn scenario_a_all_zero_frame() {
    let (service, mut rx) = service_with_events();
    let snapshot = service
        .handle_motion_notification(&[0u8; MOTION_FRAME_LEN])
        .expect("valid frame");

    assert_eq!(snapshot.timestamp_ms, 0);
    assert_eq!(snapshot.sequence, 0);
    assert_eq!(snapshot.orientation, Quaternion::IDENTITY);
    assert_eq!(snapshot.acceleration, Vec3::ZERO);
    assert_eq!(snapshot.angular_velocity, Vec3::ZERO);
    assert_eq!(snapshot.touch, TouchPosition { x: 0.0, y: 0.0 });
    assert!(!snapshot.is_touching);
    assert!(!snapshot.buttons.any());
    assert!(!snapshot.edges.any());
    assert_eq!(snapshot, ControllerSnapshot::default());

    match rx.try_recv() {
        Ok(AppEvent::Snapshot(published)) => assert_eq!(published, snapshot),
        other => panic!("expected snapshot event, got {other:?}"),
    }
}

#[test]
fn scenario_b_all_buttons_pressed() {
    let (service, _rx) = service_with_events();
    let snapshot = service
        .handle_motion_notification(&buttons_frame())
        .expect("valid frame");

    let b = snapshot.buttons;
    assert!(b.click && b.home && b.app && b.plus && b.minus);
    assert!(snapshot.click_down());
    assert!(snapshot.home_down());
    assert!(snapshot.app_down());
    assert!(snapshot.plus_down());
    assert!(snapshot.minus_down());
    assert!(!snapshot.click_up());
    assert!(!snapshot.home_up());
    assert!(!snapshot.app_up());
    assert!(!snapshot.plus_up());
    assert!(!snapshot.minus_up());

    assert_eq!(snapshot.touch, TouchPosition::default());
    assert!(!snapshot.is_touching);
    assert!(!snapshot.touch_down());
    assert!(!snapshot.touch_up());
}

#[test]
fn scenario_c_buttons_held() {
    let (service, mut rx) = service_with_events();
    let first = service
        .handle_motion_notification(&buttons_frame())
        .expect("valid frame");
    let second = service
        .handle_motion_notification(&buttons_frame())
        .expect("valid frame");

    assert_eq!(second.buttons, first.buttons);
    assert!(second.buttons.click && second.buttons.minus);
    assert_no_button_edges(&second);
    assert!(!second.edges.any());

    let (current, previous) = service.snapshots();
    assert_eq!(current, second);
    assert_eq!(previous, first);

    let published: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert_eq!(published.len(), 2);
}

#[test]
fn scenario_d_touch_begins() {
    let (service, _rx) = service_with_events();
    let mut frame = [0u8; MOTION_FRAME_LEN];
    frame[16] = 0b1111_1000;
    frame[17] = 0b0000_0000;

    let snapshot = service
        .handle_motion_notification(&frame)
        .expect("valid frame");

    assert!(snapshot.touch.x > 0.0);
    assert_eq!(snapshot.touch.y, 0.0);
    assert!(snapshot.is_touching);
    assert!(snapshot.touch_down());
    assert!(!snapshot.touch_up());
    assert!(!snapshot.buttons.any());
}

#[test]
fn release_after_press_reports_up() {
    let (service, _rx) = service_with_events();
    service
        .handle_motion_notification(&buttons_frame())
        .expect("valid frame");
    let released = service
        .handle_motion_notification(&[0u8; MOTION_FRAME_LEN])
        .expect("valid frame");

    assert!(released.click_up() && released.home_up() && released.app_up());
    assert!(released.plus_up() && released.minus_up());
    assert!(!released.click_down());
}

#[test]
fn rejected_frame_does_not_break_edge_chain() {
    let (service, mut rx) = service_with_events();
    service
        .handle_motion_notification(&buttons_frame())
        .expect("valid frame");
    let _ = rx.try_recv();

    let before = service.snapshots();
    let mut short = buttons_frame().to_vec();
    short.pop();
    assert!(service.handle_motion_notification(&short).is_err());
    let mut long = buttons_frame().to_vec();
    long.push(0);
    assert!(service.handle_motion_notification(&long).is_err());

    assert_eq!(service.snapshots(), before);
    assert!(rx.try_recv().is_err());

    // the next accepted frame still diffs against the last accepted one
    let released = service
        .handle_motion_notification(&[0u8; MOTION_FRAME_LEN])
        .expect("valid frame");
    assert!(released.click_up());
}

#[test]
fn battery_is_independent_of_motion() {
    let (service, mut rx) = service_with_events();
    assert_eq!(service.battery_level(), None);

    assert_eq!(service.handle_battery_notification(&[64]), Ok(64));
    assert_eq!(service.battery_level(), Some(64));
    assert_eq!(service.snapshots().0, ControllerSnapshot::default());
    assert!(matches!(rx.try_recv(), Ok(AppEvent::BatteryLevel(64))));

    assert!(service.handle_battery_notification(&[1, 2]).is_err());
    assert_eq!(service.battery_level(), Some(64));
    assert!(rx.try_recv().is_err());
}

#[test]
fn connectivity_is_relayed() {
    let (service, mut rx) = service_with_events();
    service.handle_connection_changed(true);
    assert!(matches!(
        rx.try_recv(),
        Ok(AppEvent::ConnectionStatus(
            daydream_controller::ConnectionStatus::Connected
        ))
    ));
}

#[test]
fn held_buttons_survive_reconnect() {
    let (service, mut rx) = service_with_events();
    let first = service
        .handle_motion_notification(&buttons_frame())
        .expect("valid frame");
    assert!(first.click_down());

    service.handle_connection_changed(false);
    service.handle_connection_changed(true);
    assert_eq!(service.current(), first);

    let after = service
        .handle_motion_notification(&buttons_frame())
        .expect("valid frame");
    assert!(after.buttons.click && after.buttons.minus);
    assert!(!after.edges.any());

    let statuses: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter_map(|event| match event {
            AppEvent::ConnectionStatus(status) => Some(status),
            _ => None,
        })
        .collect();
    assert_eq!(
        statuses,
        [
            daydream_controller::ConnectionStatus::Disconnected,
            daydream_controller::ConnectionStatus::Connected,
        ]
    );
}
