//! Parameter listing command.

use clap::Args;
use tono_eq::params::{PARAM_COUNT, descriptor};
use tono_eq::{ParamDescriptor, ParamUnit};

#[derive(Args)]
pub struct ParamsArgs {}

pub fn run(_args: ParamsArgs) -> anyhow::Result<()> {
    println!(
        "{:<12} {:<12} {:>10} {:>10} {:>10}  unit",
        "id", "name", "min", "max", "default"
    );
    for i in 0..PARAM_COUNT {
        if let Some(desc) = descriptor(i) {
            println!(
                "{:<12} {:<12} {:>10} {:>10} {:>10}  {}",
                desc.string_id,
                desc.name,
                desc.min,
                desc.max,
                desc.default,
                unit_label(&desc)
            );
        }
    }
    Ok(())
}

fn unit_label(desc: &ParamDescriptor) -> &'static str {
    match desc.unit {
        ParamUnit::Decibels => "dB",
        ParamUnit::Hertz => "Hz",
        ParamUnit::None => "-",
    }
}
