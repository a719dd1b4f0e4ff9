use clap::Parser;

use crate::{core::reference, prelude::*, quantity::electric::Volts, tables::build_reference_table};

#[must_use]
#[derive(Parser)]
pub struct ReferenceArgs {
    /// Open-circuit voltage to look up on the curve.
    #[clap(long)]
    pub voltage: Option<Volts>,
}

pub fn reference(args: &ReferenceArgs) {
    if let Some(voltage) = args.voltage {
        let state_of_charge = reference::state_of_charge(voltage);
        info!(%voltage, %state_of_charge, "interpolated");
    }
    println!("{}", build_reference_table(args.voltage));
}
