//! Equation problems for inverse solves on a gravity pipe.
//!
//! Both problems drive [`GravityPipe`](super::super::GravityPipe) with the
//! filling height as the sole input variable.

use std::convert::Infallible;

use twine_core::EquationProblem;
use uom::si::{
    area::square_meter,
    f64::{Length, VolumeRate},
    length::meter,
    volume_rate::cubic_meter_per_second,
};

use crate::support::pipe::FlowState;

/// Residual `achieved_flow - target_flow`.
pub(super) struct FlowTarget {
    target: VolumeRate,
}

impl FlowTarget {
    pub(super) fn new(target: VolumeRate) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for FlowTarget {
    type Input = Length;
    type Output = FlowState;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Length::new::<meter>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let flow = output.flow_rate.get::<cubic_meter_per_second>();
        let target = self.target.get::<cubic_meter_per_second>();
        Ok([flow - target])
    }
}

/// Stationarity of Manning flow with respect to the filling height.
///
/// Flow scales as `A^(5/3) / P^(2/3)`. With `dA/dh = b` (surface width) and
/// `dP/dh = 4r/b`, the derivative vanishes where `8·r·A = 5·b²·P`. The
/// residual `8·r·A − 5·b²·P` is negative below the maximum-flow filling and
/// positive above it.
pub(super) struct PeakFlow;

impl EquationProblem<1> for PeakFlow {
    type Input = Length;
    type Output = FlowState;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Length::new::<meter>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let r = output.geometry.radius().get::<meter>();
        let area = output.section.wetted_area.get::<square_meter>();
        let perimeter = output.section.wetted_perimeter.get::<meter>();
        let width = output.section.surface_width.get::<meter>();
        Ok([8.0 * r * area - 5.0 * width * width * perimeter])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::volume_rate::liter_per_second;

    use crate::support::pipe::{ManningRoughness, PipeGeometry, Slope};

    fn state(d: f64, h: f64) -> FlowState {
        FlowState::new(
            PipeGeometry::new(Length::new::<meter>(d), Length::new::<meter>(h)).unwrap(),
            Slope::per_mille(10.0).unwrap(),
            ManningRoughness::default(),
        )
    }

    #[test]
    fn flow_residual_sign() {
        let problem = FlowTarget::new(VolumeRate::new::<liter_per_second>(20.0));
        let input = Length::new::<meter>(0.0);

        let [below] = problem.residuals(&input, &state(0.3, 0.05)).unwrap();
        let [above] = problem.residuals(&input, &state(0.3, 0.25)).unwrap();
        assert!(below < 0.0);
        assert!(above > 0.0);
    }

    #[test]
    fn peak_residual_brackets_maximum() {
        let input = Length::new::<meter>(0.0);

        let [half] = PeakFlow.residuals(&input, &state(1.0, 0.5)).unwrap();
        let [near_peak] = PeakFlow.residuals(&input, &state(1.0, 0.93)).unwrap();
        let [beyond_peak] = PeakFlow.residuals(&input, &state(1.0, 0.95)).unwrap();
        let [full] = PeakFlow.residuals(&input, &state(1.0, 1.0)).unwrap();

        assert!(half < 0.0);
        assert!(near_peak < 0.0);
        assert!(beyond_peak > 0.0);
        assert!(full > 0.0);
    }

    #[test]
    fn input_is_filling_in_meters() {
        let filling = FlowTarget::new(VolumeRate::new::<liter_per_second>(1.0))
            .input(&[0.125])
            .unwrap();
        assert_eq!(filling.get::<meter>(), 0.125);
    }
}
