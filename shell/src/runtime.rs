//! Event loop: feed events to the Crux core, perform the effects it asks
//! for, and resolve each request with the outcome until nothing is left.

use std::collections::VecDeque;

use crux_core::Core;
use skylog_shared::capabilities::HttpOperation;
use skylog_shared::render::{paint, RenderTarget};
use skylog_shared::{App, Effect, Event, ViewModel};

use crate::kv_store::PreferenceFile;
use crate::source::Source;

pub struct Runtime<T> {
    core: Core<Effect, App>,
    source: Source,
    preferences: PreferenceFile,
    target: T,
    renders: usize,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Runtime<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("source", &self.source)
            .field("preferences", &self.preferences)
            .field("target", &self.target)
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}

impl<T: RenderTarget> Runtime<T> {
    pub fn new(source: Source, preferences: PreferenceFile, target: T) -> Self {
        Self {
            core: Core::new(),
            source,
            preferences,
            target,
            renders: 0,
        }
    }

    /// Run `event` and everything its effects lead to.
    pub async fn dispatch(&mut self, event: Event) {
        let mut pending: VecDeque<Effect> = self.core.process_event(event).into();

        while let Some(effect) = pending.pop_front() {
            tracing::trace!(effect = effect.name(), "performing effect");
            match effect {
                Effect::Render(_) => {
                    paint(&mut self.target, &self.core.view());
                    self.renders += 1;
                }
                Effect::Http(mut request) => {
                    let HttpOperation::Get { path } = &request.operation;
                    let result = self.source.fetch(path).await;
                    pending.extend(self.core.resolve(&mut request, result));
                }
                Effect::KeyValue(mut request) => {
                    let result = self.preferences.perform(&request.operation).await;
                    pending.extend(self.core.resolve(&mut request, result));
                }
            }
        }
    }

    pub fn view(&self) -> ViewModel {
        self.core.view()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Number of repaints so far.
    pub fn renders(&self) -> usize {
        self.renders
    }
}
