pub use self::{calculator::CalculatorPanel, simulator::SimulatorPanel};

mod calculator;
mod simulator;
