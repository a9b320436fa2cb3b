//! Quadrature knob task.
//!
//! Wakes on any edge of either encoder line, feeds the pin levels to a
//! [`QuadratureDecoder`] and queues one event per detent.

use super::buttons::InputSender;
use crate::config::ENCODER_CLOCKWISE_IS_NEXT;
use crate::ui::input_logic::{event_for, QuadratureDecoder};
use defmt::trace;
use embassy_futures::select::select;
use embassy_nrf::gpio::{AnyPin, Input, Pull};

pub async fn encoder_task(pin_a: AnyPin, pin_b: AnyPin, tx: InputSender) -> ! {
    let mut a = Input::new(pin_a, Pull::Up);
    let mut b = Input::new(pin_b, Pull::Up);
    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        if let Some(rotation) = decoder.update(a.is_high(), b.is_high()) {
            let event = event_for(rotation, ENCODER_CLOCKWISE_IS_NEXT);
            trace!("Encoder: {} -> {}", rotation, event);
            // A full queue drops the detent.
            let _ = tx.try_send(event);
        }
    }
}
