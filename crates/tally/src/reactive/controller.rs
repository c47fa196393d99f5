// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


use crate::context::DataContext;
use crate::reactive::events::UiEvent;
use crate::views::{
    CalorieRange, ChartSpec, ControlPanel, HeatmapTrigger, SegmentationParams, ViewId,
    ViewParameters, ViewRegistry,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Computing,
}
/// Latest spec a view has published, with the sequence of the event that
/// produced it.
#[derive(Debug, Clone, Default)]
pub struct Published {
    pub sequence: u64,
    pub spec: Option<Arc<ChartSpec>>,
}
/// Outcome of one completed computation. `superseded` is set when a newer
/// event for the same view published first.
#[derive(Debug, Clone, Serialize)]
pub struct Emission {
    pub view: ViewId,
    pub sequence: u64,
    pub spec: Arc<ChartSpec>,
    pub superseded: bool,
}
#[derive(Debug)]
struct ViewSlot {
    issued: AtomicU64,
    in_flight: AtomicUsize,
    published: watch::Sender<Published>,
}
impl ViewSlot {
    fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            published: watch::Sender::new(Published::default()),
        }
    }
}
/// Routes UI events to the single view they affect and publishes the
/// recomputed spec. Views share nothing but the read-only data context.
#[derive(Debug)]
pub struct ReactiveController {
    context: Arc<DataContext>,
    registry: ViewRegistry,
    controls: ControlPanel,
    calorie_bounds: Option<(f64, f64)>,
    slots: [ViewSlot; 3],
}
impl ReactiveController {
    /// Builds the controller and publishes every view once with its default
    /// parameters.
    pub fn new(context: Arc<DataContext>) -> Self {
        let controls = ControlPanel::from_context(&context);
        let calorie_bounds = context.calorie_bounds();
        let controller = Self {
            context,
            registry: ViewRegistry::new(),
            controls,
            calorie_bounds,
            slots: [ViewSlot::new(), ViewSlot::new(), ViewSlot::new()],
        };
        for definition in controller.registry.definitions() {
            debug!(
                view = %definition.id,
                title = definition.title,
                datasets = ?definition.datasets,
                "Publishing initial view"
            );
            controller.apply(controller.controls.default_parameters(definition.id));
        }
        controller
    }
    pub fn context(&self) -> &Arc<DataContext> {
        &self.context
    }
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }
    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }
    pub fn handle(&self, event: UiEvent) -> Emission {
        self.begin(event).complete()
    }
    pub fn apply(&self, params: ViewParameters) -> Emission {
        self.begin_with(params).complete()
    }
    /// Moves the event's view to `Computing` and stamps the event. Nothing is
    /// rendered until [`PendingComputation::complete`].
    pub fn begin(&self, event: UiEvent) -> PendingComputation<'_> {
        let params = self.resolve(event);
        self.begin_with(params)
    }
    pub fn begin_with(&self, params: ViewParameters) -> PendingComputation<'_> {
        let view = params.view();
        let slot = self.slot(view);
        slot.in_flight.fetch_add(1, Ordering::SeqCst);
        let sequence = slot.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(view = %view, sequence, "View computing");
        PendingComputation {
            controller: self,
            slot,
            view,
            sequence,
            params,
        }
    }
    pub fn state(&self, view: ViewId) -> ViewState {
        if self.slot(view).in_flight.load(Ordering::SeqCst) > 0 {
            ViewState::Computing
        } else {
            ViewState::Idle
        }
    }
    pub fn current(&self, view: ViewId) -> Option<Arc<ChartSpec>> {
        self.slot(view).published.borrow().spec.clone()
    }
    pub fn published_sequence(&self, view: ViewId) -> u64 {
        self.slot(view).published.borrow().sequence
    }
    pub fn subscribe(&self, view: ViewId) -> watch::Receiver<Published> {
        self.slot(view).published.subscribe()
    }
    fn slot(&self, view: ViewId) -> &ViewSlot {
        &self.slots[view.index()]
    }
    fn resolve(&self, event: UiEvent) -> ViewParameters {
        match event {
            UiEvent::ClusterSelected { value } => {
                let known = self
                    .controls
                    .cluster_dropdown
                    .options
                    .iter()
                    .any(|o| o.value == value);
                if !known {
                    debug!(cluster = %value, "Selected cluster is not in the portfolio");
                }
                ViewParameters::Segmentation(SegmentationParams { cluster: value })
            }
            UiEvent::CalorieRangeChanged { low, high } => ViewParameters::CalorieDistribution(
                CalorieRange::new(low, high).clamped(self.calorie_bounds),
            ),
            UiEvent::HeatmapRefreshRequested { trigger_count } => ViewParameters::LocationHeatmap {
                trigger: HeatmapTrigger(trigger_count),
            },
        }
    }
}
/// A stamped event whose view is `Computing`. Dropping it without
/// completing returns the view to `Idle` without publishing.
#[derive(Debug)]
pub struct PendingComputation<'a> {
    controller: &'a ReactiveController,
    slot: &'a ViewSlot,
    view: ViewId,
    sequence: u64,
    params: ViewParameters,
}
impl PendingComputation<'_> {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
    pub fn view(&self) -> ViewId {
        self.view
    }
    pub fn params(&self) -> &ViewParameters {
        &self.params
    }
    /// Runs the view's transform and publishes the result unless a newer
    /// event for the same view already has.
    pub fn complete(self) -> Emission {
        let spec = Arc::new(
            self.controller
                .registry
                .render(&self.controller.context, &self.params),
        );
        let sequence = self.sequence;
        let published = self.slot.published.send_if_modified(|current| {
            if sequence > current.sequence {
                *current = Published {
                    sequence,
                    spec: Some(spec.clone()),
                };
                true
            } else {
                false
            }
        });
        if !published {
            debug!(view = %self.view, sequence, "Discarding stale view result");
        }
        Emission {
            view: self.view,
            sequence,
            spec,
            superseded: !published,
        }
    }
}
impl Drop for PendingComputation<'_> {
    fn drop(&mut self) {
        self.slot.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
