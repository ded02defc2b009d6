use glam::IVec2;
use miette::*;
use state_cycle::Direction;

use crate::contraption::{Beam, Contraption};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let contraption = Contraption::parse(input)?;
    let energized = contraption.energize(Beam::new(IVec2::ZERO, Direction::East));
    Ok(energized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contraption::tests::SAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("46", process(SAMPLE)?);
        Ok(())
    }
}
