use miette::*;

use crate::platform::{north_load, parse, tilt_north};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let mut grid = parse(input)?;
    tilt_north(&mut grid);
    Ok(north_load(&grid).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::tests::SAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("136", process(SAMPLE)?);
        Ok(())
    }
}
