//! Engine runtime tests

use std::time::Duration;

use glam::Vec3;
use nativestate_shared::{SpotlightPreset, StateRecord};

use super::*;
use crate::bridge::StateBridge;
use crate::producer::{NoTextures, StateProducer};
use crate::test_utils::{SharedScene, wait_for};

const TIMEOUT: Duration = Duration::from_secs(5);

fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        tick_rate: 500,
        ..RuntimeConfig::default()
    }
}

// ============================================================================
// RuntimeConfig Tests
// ============================================================================

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.tick_rate, 60);
    assert_eq!(config.frame_budget, Duration::from_micros(4000));
}

#[test]
fn test_tick_duration() {
    let config = RuntimeConfig {
        tick_rate: 50,
        ..RuntimeConfig::default()
    };
    assert_eq!(config.tick_duration(), Duration::from_millis(20));

    // A zero tick rate is treated as 1 Hz
    let config = RuntimeConfig {
        tick_rate: 0,
        ..RuntimeConfig::default()
    };
    assert_eq!(config.tick_duration(), Duration::from_secs(1));
}

// ============================================================================
// Engine Thread Tests
// ============================================================================

#[test]
fn test_engine_applies_default_before_any_push() {
    let bridge = Arc::new(StateBridge::new());
    let scene = SharedScene::default();

    let engine = {
        let scene = scene.clone();
        EngineThread::spawn(bridge.clone(), fast_config(), move || scene).unwrap()
    };

    assert!(wait_for(TIMEOUT, || engine.frames() > 0));
    assert_eq!(engine.registration(), Some(Registration::Accepted));
    assert_eq!(engine.consumer().received(), 0);

    let (visible, scale, light, texture) = scene.snapshot();
    assert!(visible);
    assert_eq!(scale, Vec3::ONE);
    assert_eq!(light, Vec3::ONE);
    assert_eq!(texture, None);
}

#[test]
fn test_engine_registration_triggers_sync() {
    let producer = Arc::new(StateProducer::new(
        Arc::new(StateBridge::new()),
        Arc::new(NoTextures),
    ));
    producer.set_scale(2.0);
    producer.set_spotlight(SpotlightPreset::Cool);

    let scene = SharedScene::default();
    let engine = {
        let scene = scene.clone();
        EngineThread::spawn(producer.clone(), fast_config(), move || scene).unwrap()
    };

    assert!(wait_for(TIMEOUT, || engine.consumer().received() == 1));
    assert!(wait_for(TIMEOUT, || scene.snapshot().1 == Vec3::splat(2.0)));
    assert_eq!(scene.snapshot().2, SpotlightPreset::Cool.color());
}

#[test]
fn test_engine_follows_producer_changes() {
    let producer = Arc::new(StateProducer::new(
        Arc::new(StateBridge::new()),
        Arc::new(NoTextures),
    ));
    let scene = SharedScene::default();
    let engine = {
        let scene = scene.clone();
        EngineThread::spawn(producer.clone(), fast_config(), move || scene).unwrap()
    };
    assert!(wait_for(TIMEOUT, || engine.registration().is_some()));

    producer.set_visible(false);
    producer.set_scale(3.0);

    assert!(wait_for(TIMEOUT, || {
        let (visible, scale, _, _) = scene.snapshot();
        !visible && scale == Vec3::splat(3.0)
    }));
    assert_eq!(
        engine.consumer().current(),
        StateRecord {
            scale: 3.0,
            visible: false,
            ..StateRecord::default()
        }
    );
}

#[test]
fn test_second_engine_on_same_bridge_is_ignored() {
    let bridge = Arc::new(StateBridge::new());
    let first = EngineThread::spawn(bridge.clone(), fast_config(), SharedScene::default).unwrap();
    assert!(wait_for(TIMEOUT, || first.registration().is_some()));

    let second = EngineThread::spawn(bridge.clone(), fast_config(), SharedScene::default).unwrap();
    assert!(wait_for(TIMEOUT, || second.registration().is_some()));
    assert_eq!(first.registration(), Some(Registration::Accepted));
    assert_eq!(second.registration(), Some(Registration::Ignored));

    bridge.push(StateRecord::default());
    assert_eq!(first.consumer().received(), 1);
    assert_eq!(second.consumer().received(), 0);
}

#[test]
fn test_shutdown_joins_thread() {
    let bridge = Arc::new(StateBridge::new());
    let engine = EngineThread::spawn(bridge, fast_config(), SharedScene::default).unwrap();
    assert!(wait_for(TIMEOUT, || engine.frames() > 0));
    assert!(engine.is_alive());

    let consumer = engine.consumer().clone();
    engine.shutdown();

    // The consumer outlives the thread and keeps its last record
    assert_eq!(consumer.current(), StateRecord::default());
}

#[test]
fn test_restarted_engine_reuses_consumer() {
    let producer = Arc::new(StateProducer::new(
        Arc::new(StateBridge::new()),
        Arc::new(NoTextures),
    ));
    let consumer = Arc::new(StateConsumer::new());

    let first = EngineThread::spawn_with(
        consumer.clone(),
        producer.clone(),
        fast_config(),
        SharedScene::default,
    )
    .unwrap();
    assert!(wait_for(TIMEOUT, || first.registration().is_some()));
    first.shutdown();

    // Changes made while the engine is down still land in the consumer
    producer.set_scale(2.0);

    let scene = SharedScene::default();
    let second = {
        let scene = scene.clone();
        EngineThread::spawn_with(consumer.clone(), producer.clone(), fast_config(), move || {
            scene
        })
        .unwrap()
    };
    assert!(wait_for(TIMEOUT, || second.registration().is_some()));
    assert_eq!(second.registration(), Some(Registration::Accepted));
    assert!(wait_for(TIMEOUT, || scene.snapshot().1 == Vec3::splat(2.0)));
}
