//! Integration tests for the native state channel
//!
//! Tests the full path from host-side setters through the bridge to the
//! engine thread's scene, and the host lifecycle around it.


#[cfg(test)]
pub(crate) mod test_utils {
    use std::sync::Arc;

    use crate::{
        bridge::StateBridge,
        lifecycle::HostLifecycle,
        preloader::AssetPreloader,
        producer::StateProducer,
        runtime::{RuntimeConfig, ThreadedEngine},
        test_utils::{ScriptedSource, SharedScene, demo_entries},
    };

    /// Host side plus an engine that drives `scene`
    pub struct Harness {
        pub lifecycle: HostLifecycle,
        pub producer: Arc<StateProducer>,
        pub engine: ThreadedEngine<SharedScene>,
        pub scene: SharedScene,
    }

    /// Wire preloader, producer, lifecycle and a threaded engine together
    pub fn harness(source: ScriptedSource) -> Harness {
        let preloader = Arc::new(AssetPreloader::new(demo_entries(), source).unwrap());
        let producer = Arc::new(StateProducer::new(
            Arc::new(StateBridge::new()),
            preloader.clone(),
        ));
        let scene = SharedScene::default();
        let engine = {
            let scene = scene.clone();
            let config = RuntimeConfig {
                tick_rate: 500,
                ..RuntimeConfig::default()
            };
            ThreadedEngine::new(producer.clone(), config, move || scene.clone())
        };
        Harness {
            lifecycle: HostLifecycle::new(preloader),
            producer,
            engine,
            scene,
        }
    }

    pub fn demo_source() -> ScriptedSource {
        ScriptedSource::new()
            .with_texture("marble", 64, 64)
            .with_texture("checkerboard", 32, 16)
    }
}
