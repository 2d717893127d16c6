macro_rules! info {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)+);
    );
}

// Named apart from the built-in `warn` lint attribute, which a `warn`
// macro would make ambiguous.
macro_rules! warning {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
    );
}

pub(crate) use info;
pub(crate) use warning;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[warn(unused_variables)]
    fn when_warning_is_logged_it_coexists_with_warn_attribute() {
        warning!("Recording exhausted, forcing completion");
        info!("Mode set");
    }
}
