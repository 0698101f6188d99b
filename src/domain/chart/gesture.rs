use super::entities::ViewportController;
use super::value_objects::{DeviceClass, Viewport, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_trace};

/// Raw input from the host surface, already reduced to the axis that matters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Wheel notch; negative `delta_y` scrolls up (zoom in)
    Wheel { delta_y: f64 },
    /// Mouse button pressed
    MouseDown { coordinate: f64 },
    /// Fingers placed; only a single finger starts a drag
    TouchStart { coordinate: f64, touches: u32 },
    /// Mouse or finger moved over a surface `surface_height_px` tall
    Move { coordinate: f64, surface_height_px: f64 },
    /// Button released or finger lifted
    End,
    /// Pointer left the surface
    Leave,
}

/// Anchor of one drag, alive between drag start and drag end
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub anchor_domain: Viewport,
    pub anchor_pointer_coordinate: f64,
    pub device_class: DeviceClass,
}

impl GestureSession {
    /// Price offset from the anchor for a pointer now at `coordinate`
    pub fn delta_price(&self, coordinate: f64, surface_height_px: f64) -> Option<f64> {
        if !(surface_height_px > 0.0) || !coordinate.is_finite() {
            return None;
        }
        let price_per_pixel = self.anchor_domain.range() / surface_height_px;
        let delta = (coordinate - self.anchor_pointer_coordinate) * price_per_pixel;
        delta.is_finite().then_some(delta)
    }
}

/// Translates pointer input into zoom and pan calls, one drag at a time.
#[derive(Debug, Clone)]
pub struct GestureRouter {
    device_class: DeviceClass,
    session: Option<GestureSession>,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
}

impl GestureRouter {
    pub fn new(device_class: DeviceClass) -> Self {
        Self::with_factors(device_class, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR)
    }

    pub fn with_factors(device_class: DeviceClass, zoom_in_factor: f64, zoom_out_factor: f64) -> Self {
        Self { device_class, session: None, zoom_in_factor, zoom_out_factor }
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Feed one input event. Returns whether the viewport changed.
    pub fn handle(&mut self, input: PointerInput, viewport: &mut ViewportController) -> bool {
        match input {
            PointerInput::Wheel { delta_y } => self.wheel(delta_y, viewport),
            PointerInput::MouseDown { coordinate } => {
                self.drag_start(coordinate, viewport);
                false
            }
            PointerInput::TouchStart { coordinate, touches } => {
                if touches == 1 {
                    self.drag_start(coordinate, viewport);
                }
                false
            }
            PointerInput::Move { coordinate, surface_height_px } => {
                self.drag_move(coordinate, surface_height_px, viewport)
            }
            PointerInput::End | PointerInput::Leave => {
                self.drag_end();
                false
            }
        }
    }

    /// One zoom step around the domain center; ignored on touch surfaces.
    pub fn wheel(&mut self, delta_y: f64, viewport: &mut ViewportController) -> bool {
        if !self.device_class.allows_wheel_zoom() || !delta_y.is_finite() || delta_y == 0.0 {
            return false;
        }
        let factor = if delta_y < 0.0 { self.zoom_in_factor } else { self.zoom_out_factor };
        let center = viewport.viewport().center();
        viewport.zoom(center, factor)
    }

    /// Open a session anchored at `coordinate`. Rejected while another
    /// session is open or before the viewport has a domain.
    pub fn drag_start(&mut self, coordinate: f64, viewport: &ViewportController) -> bool {
        if self.session.is_some() {
            log_trace!(LogComponent::Domain("Gesture"), "drag start rejected, session already open");
            return false;
        }
        if !viewport.is_initialized() || !coordinate.is_finite() {
            return false;
        }

        self.session = Some(GestureSession {
            anchor_domain: viewport.viewport().clone(),
            anchor_pointer_coordinate: coordinate,
            device_class: self.device_class,
        });
        log_debug!(LogComponent::Domain("Gesture"), "{} drag opened at {:.1}", self.device_class, coordinate);
        true
    }

    /// Pan to the session anchor offset by the pointer travel.
    pub fn drag_move(&mut self, coordinate: f64, surface_height_px: f64, viewport: &mut ViewportController) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        match session.delta_price(coordinate, surface_height_px) {
            Some(delta) => viewport.pan_from(&session.anchor_domain, delta),
            None => false,
        }
    }

    pub fn drag_end(&mut self) {
        if self.session.take().is_some() {
            log_debug!(LogComponent::Domain("Gesture"), "drag closed");
        }
    }

    /// Drop an open session without touching the viewport
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
