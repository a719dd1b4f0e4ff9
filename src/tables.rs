use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{Measurement, Mode, Point, Settings, Summary, reference},
    fmt::FormattedDuration,
    quantity::{electric::Volts, proportions::Percentage},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

const fn state_of_charge_color(state_of_charge: Percentage) -> Color {
    if state_of_charge.0 > 60.0 {
        Color::Green
    } else if state_of_charge.0 > 20.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn build_status_table(summary: &Summary, settings: &Settings) -> Table {
    let (current_header, remaining_header, mode_color) = match summary.mode {
        Mode::Charging => ("Charge current", "Est. time to full", Color::Green),
        Mode::Discharging => ("Current draw", "Est. runtime left", Color::Red),
    };
    let mut table = new_table();
    table.set_header(vec![
        "SoC",
        "Health",
        "Remaining",
        current_header,
        "Last voltage",
        remaining_header,
    ]);
    table.add_row(vec![
        Cell::new(summary.state_of_charge)
            .fg(state_of_charge_color(summary.state_of_charge))
            .add_attribute(Attribute::Bold),
        Cell::new(settings.health).add_attribute(Attribute::Dim),
        Cell::new(summary.residual_charge).fg(Color::Blue),
        Cell::new(summary.current.abs()).fg(if summary.mode.is_charging() {
            Color::Green
        } else {
            Color::Yellow
        }),
        Cell::new(summary.last_voltage),
        Cell::new(FormattedDuration(summary.remaining_time())).fg(mode_color),
    ]);
    table
}

pub fn build_history_table<'a>(
    measurements: impl IntoIterator<Item = &'a Measurement>,
    settings: &Settings,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Date", "Time", "Voltage", "Load", "Rated", "Input", "Current", "Elapsed", "Used", "Left",
        "SoC",
    ]);
    for measurement in measurements {
        let snapshot = &measurement.snapshot;
        let load_ratio = Percentage(100.0 * (measurement.load / settings.rated_power));
        table.add_row(vec![
            Cell::new(snapshot.timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(snapshot.timestamp.format("%H:%M")),
            Cell::new(snapshot.voltage).set_alignment(CellAlignment::Right),
            Cell::new(measurement.load).set_alignment(CellAlignment::Right),
            Cell::new(load_ratio).set_alignment(CellAlignment::Right).fg(
                if load_ratio > Percentage::FULL { Color::Red } else { Color::Reset },
            ),
            Cell::new(measurement.input_voltage)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(snapshot.current).set_alignment(CellAlignment::Right),
            Cell::new(measurement.elapsed)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(measurement.consumed_charge).set_alignment(CellAlignment::Right),
            Cell::new(snapshot.residual_charge).set_alignment(CellAlignment::Right),
            Cell::new(snapshot.state_of_charge)
                .set_alignment(CellAlignment::Right)
                .fg(state_of_charge_color(snapshot.state_of_charge)),
        ]);
    }
    table
}

/// Build the forecast table: measured points as they are, every `stride`-th forecast step dimmed.
///
/// The final forecast step is always shown.
pub fn build_forecast_table(points: &[Point], stride: usize) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Date", "Time", "Voltage", "Left", "SoC", "Current"]);
    let stride = stride.max(1);
    let n_forecast_steps = points.iter().filter(|point| point.is_forecast()).count();
    let mut step = 0;
    for point in points {
        if point.is_forecast() {
            step += 1;
            if step % stride != 0 && step != n_forecast_steps {
                continue;
            }
        }
        let snapshot = point.snapshot();
        let style = |cell: Cell| {
            if point.is_forecast() { cell.add_attribute(Attribute::Dim) } else { cell }
        };
        table.add_row(vec![
            style(Cell::new(if point.is_forecast() { "forecast" } else { "measured" })),
            Cell::new(snapshot.timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            style(Cell::new(snapshot.timestamp.format("%H:%M"))),
            style(Cell::new(snapshot.voltage).set_alignment(CellAlignment::Right)),
            style(Cell::new(snapshot.residual_charge).set_alignment(CellAlignment::Right)),
            style(
                Cell::new(snapshot.state_of_charge)
                    .set_alignment(CellAlignment::Right)
                    .fg(state_of_charge_color(snapshot.state_of_charge)),
            ),
            style(Cell::new(snapshot.current).set_alignment(CellAlignment::Right)),
        ]);
    }
    table
}

/// Build the reference curve table, highest voltage first, optionally marking the given voltage.
pub fn build_reference_table(voltage: Option<Volts>) -> Table {
    let zone_color = |state_of_charge: Percentage| {
        if state_of_charge.0 > 40.0 {
            Color::Green
        } else if state_of_charge.0 > 20.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    };
    let mut table = new_table();
    table.set_header(vec!["", "Voltage", "SoC"]);
    if let Some(voltage) = voltage {
        let state_of_charge = reference::state_of_charge(voltage);
        table.add_row(vec![
            Cell::new("Current").add_attribute(Attribute::Bold),
            Cell::new(voltage).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
            Cell::new(state_of_charge)
                .set_alignment(CellAlignment::Right)
                .fg(zone_color(state_of_charge))
                .add_attribute(Attribute::Bold),
        ]);
    }
    for breakpoint in reference::BREAKPOINTS.iter().rev() {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(breakpoint.voltage).set_alignment(CellAlignment::Right),
            Cell::new(breakpoint.state_of_charge)
                .set_alignment(CellAlignment::Right)
                .fg(zone_color(breakpoint.state_of_charge)),
        ]);
    }
    table
}
