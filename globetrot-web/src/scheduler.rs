//! Browser timers for the tour engine.
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use globetrot_tour::{Scheduler, TimerKind, TimerTicket};

use crate::dom;

/// Receives fired tickets; normally forwards into the engine.
pub type TicketSink = Rc<dyn Fn(TimerTicket)>;

struct PendingTimeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

/// [`Scheduler`] backed by `window.setTimeout`, one handle per timer kind.
pub struct BrowserScheduler {
    pending: HashMap<TimerKind, PendingTimeout>,
    sink: TicketSink,
}

impl BrowserScheduler {
    pub fn new(sink: impl Fn(TimerTicket) + 'static) -> Self {
        Self {
            pending: HashMap::new(),
            sink: Rc::new(sink),
        }
    }

    fn clear(&mut self, kind: TimerKind) {
        if let Some(timeout) = self.pending.remove(&kind) {
            if let Some(win) = dom::window() {
                win.clear_timeout_with_handle(timeout.handle);
            }
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration) {
        self.clear(ticket.kind);
        let Some(win) = dom::window() else {
            dom::console_error("Failed to schedule tour timer: window unavailable");
            return;
        };
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let sink = Rc::clone(&self.sink);
        let callback = Closure::once(move || sink(ticket));
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(handle) => {
                self.pending.insert(
                    ticket.kind,
                    PendingTimeout {
                        handle,
                        _callback: callback,
                    },
                );
            }
            Err(err) => dom::console_error(&format!(
                "Failed to schedule tour timer: {}",
                dom::js_error_message(&err)
            )),
        }
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.clear(kind);
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for kind in [TimerKind::Cycle, TimerKind::Idle] {
            self.clear(kind);
        }
    }
}
