use clap::{Args, ValueEnum};
use fittimer_core::timer::{Direction, SetupField};
use fittimer_core::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FieldArg {
    /// Total length (minutes, step 5, 5..=60)
    Total,
    /// Work phase (seconds, step 15, 15..=120)
    Work,
    /// Rest phase (seconds, step 10, 10..=60)
    Rest,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

#[derive(Args, Debug)]
pub struct SetupArgs {
    pub field: FieldArg,
    pub direction: DirectionArg,
}

impl From<FieldArg> for SetupField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Total => SetupField::Total,
            FieldArg::Work => SetupField::Work,
            FieldArg::Rest => SetupField::Rest,
        }
    }
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

pub fn run(args: SetupArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    config.session = config.session.clamped();
    config.session.adjust(args.field.into(), args.direction.into());
    config.save()?;

    let s = &config.session;
    println!(
        "{} min total, {}s work / {}s rest -> {} cycles",
        s.total_minutes,
        s.work_secs,
        s.rest_secs,
        s.planned_cycles()
    );
    Ok(())
}
