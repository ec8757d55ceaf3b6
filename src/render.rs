//! Rendering of engine events to an output stream.
//!
//! Text format:
//!
//! ```text
//! TRADE <restingId> <restingPrice> <qty> <incomingId> <incomingPrice> <qty>
//! SELL:
//! <price> <quantity>
//! BUY:
//! <price> <quantity>
//! ```
//!
//! JSON format writes one serialized [`EngineEvent`] per line.

use crate::execution::{BookSnapshot, EngineEvent, Trade};
use std::io::{self, Write};

/// How events are written to the output stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write one event in the given format.
pub fn render_event(w: &mut impl Write, event: &EngineEvent, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => match event {
            EngineEvent::Trade(trade) => write_trade(w, trade),
            EngineEvent::Book(snapshot) => write_snapshot(w, snapshot),
        },
        OutputFormat::Json => {
            serde_json::to_writer(&mut *w, event)?;
            writeln!(w)
        }
    }
}

fn write_trade(w: &mut impl Write, t: &Trade) -> io::Result<()> {
    writeln!(
        w,
        "TRADE {} {} {} {} {} {}",
        t.resting_order_id, t.resting_price, t.quantity, t.incoming_order_id, t.incoming_price, t.quantity
    )
}

fn write_snapshot(w: &mut impl Write, snapshot: &BookSnapshot) -> io::Result<()> {
    writeln!(w, "SELL:")?;
    for level in &snapshot.asks {
        writeln!(w, "{} {}", level.price, level.quantity)?;
    }
    writeln!(w, "BUY:")?;
    for level in &snapshot.bids {
        writeln!(w, "{} {}", level.price, level.quantity)?;
    }
    Ok(())
}
