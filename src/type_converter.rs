//! Generic value conversion used for binding settings, independent of serde.
//!
//! Converters are registered explicitly in a [`ConverterRegistry`] at startup.

use crate::{error::ConversionError, interval::TimeInterval};
use log::debug;
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
};

/// A value handed to a converter together with its type name for error reporting.
#[derive(Clone, Copy)]
pub struct Source<'a> {
    value: &'a dyn Any,
    type_name: &'static str,
}

impl<'a> Source<'a> {
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.value.type_id()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref()
    }

    fn as_str(&self) -> Option<&'a str> {
        self.downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| self.downcast_ref::<&'static str>().copied())
    }
}

pub trait TypeConverter {
    fn can_convert_from(&self, source: TypeId) -> bool;
    fn convert_from(&self, value: Source) -> Result<Box<dyn Any>, ConversionError>;
}

/// Fallback converter that converts nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseConverter;

impl TypeConverter for BaseConverter {
    fn can_convert_from(&self, _source: TypeId) -> bool {
        false
    }

    fn convert_from(&self, value: Source) -> Result<Box<dyn Any>, ConversionError> {
        Err(ConversionError::Unsupported {
            from: value.type_name(),
        })
    }
}

/// Converts strings into [`TimeInterval`]. Parse errors are swallowed and the
/// base converter gets the last word.
#[derive(Debug, Default)]
pub struct TimeIntervalTypeConverter<B = BaseConverter> {
    base: B,
}

impl<B: TypeConverter> TimeIntervalTypeConverter<B> {
    pub fn with_base(base: B) -> Self {
        Self { base }
    }
}

impl<B: TypeConverter> TypeConverter for TimeIntervalTypeConverter<B> {
    fn can_convert_from(&self, source: TypeId) -> bool {
        source == TypeId::of::<String>()
            || source == TypeId::of::<&'static str>()
            || self.base.can_convert_from(source)
    }

    fn convert_from(&self, value: Source) -> Result<Box<dyn Any>, ConversionError> {
        if let Some(token) = value.as_str() {
            match TimeInterval::parse(token) {
                Ok(duration) => return Ok(Box::new(TimeInterval::from_duration(duration))),
                Err(e) => debug!("Failed to convert {token:?} to a time interval: {e}"),
            }
        }
        self.base.convert_from(value)
    }
}

#[derive(Default)]
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Box<dyn TypeConverter + Send + Sync>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<TimeInterval>(TimeIntervalTypeConverter::<BaseConverter>::default());
        registry
    }

    pub fn register<T: Any>(&mut self, converter: impl TypeConverter + Send + Sync + 'static) {
        debug!("Registering converter for {}", type_name::<T>());
        self.converters.insert(TypeId::of::<T>(), Box::new(converter));
    }

    pub fn converter_for<T: Any>(&self) -> Option<&(dyn TypeConverter + Send + Sync)> {
        self.converters.get(&TypeId::of::<T>()).map(|c| c.as_ref())
    }

    pub fn can_convert<T: Any, V: Any>(&self) -> bool {
        self.converter_for::<T>()
            .map_or(false, |c| c.can_convert_from(TypeId::of::<V>()))
    }

    pub fn convert<T: Any, V: Any>(&self, value: &V) -> Result<T, ConversionError> {
        let converter = self
            .converter_for::<T>()
            .ok_or(ConversionError::NotRegistered {
                target: type_name::<T>(),
            })?;
        let converted = converter.convert_from(Source::new(value))?;
        converted
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ConversionError::UnexpectedType {
                expected: type_name::<T>(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger;
    use std::{cell::Cell, time::Duration};

    #[derive(Default)]
    struct RecordingBase {
        calls: Cell<usize>,
    }

    impl TypeConverter for RecordingBase {
        fn can_convert_from(&self, source: TypeId) -> bool {
            source == TypeId::of::<i32>()
        }

        fn convert_from(&self, value: Source) -> Result<Box<dyn Any>, ConversionError> {
            self.calls.set(self.calls.get() + 1);
            match value.downcast_ref::<i32>() {
                Some(&secs) => Ok(Box::new(TimeInterval::from_duration(Duration::from_secs(
                    secs as u64,
                )))),
                None => BaseConverter.convert_from(value),
            }
        }
    }

    #[test]
    fn string_converts_like_parse() {
        logger::init_for_tests();
        let converter = TimeIntervalTypeConverter::<BaseConverter>::default();
        let token = String::from("5s");
        let converted = converter.convert_from(Source::new(&token)).unwrap();
        let interval = converted.downcast_ref::<TimeInterval>().unwrap();
        assert_eq!(
            interval.to_duration(),
            TimeInterval::parse("5s").unwrap()
        );

        let converted = converter.convert_from(Source::new(&"1d/2h")).unwrap();
        assert_eq!(
            converted.downcast_ref::<TimeInterval>().unwrap().to_duration(),
            Duration::from_secs(26 * 3600)
        );
    }

    #[test]
    fn can_convert_from_strings_or_base() {
        let converter = TimeIntervalTypeConverter::with_base(RecordingBase::default());
        assert!(converter.can_convert_from(TypeId::of::<String>()));
        assert!(converter.can_convert_from(TypeId::of::<&'static str>()));
        assert!(converter.can_convert_from(TypeId::of::<i32>()));
        assert!(!converter.can_convert_from(TypeId::of::<f64>()));
        assert!(!TimeIntervalTypeConverter::<BaseConverter>::default()
            .can_convert_from(TypeId::of::<i32>()));
    }

    #[test]
    fn non_string_goes_to_base() {
        logger::init_for_tests();
        let converter = TimeIntervalTypeConverter::with_base(RecordingBase::default());
        let converted = converter.convert_from(Source::new(&42i32)).unwrap();
        assert_eq!(
            converted.downcast_ref::<TimeInterval>().unwrap().to_duration(),
            Duration::from_secs(42)
        );
        assert_eq!(converter.base.calls.get(), 1);

        let plain = TimeIntervalTypeConverter::<BaseConverter>::default();
        assert_eq!(
            plain.convert_from(Source::new(&42i32)).unwrap_err(),
            ConversionError::Unsupported { from: "i32" }
        );
    }

    #[test]
    fn parse_failure_falls_back_to_base() {
        logger::init_for_tests();
        let converter = TimeIntervalTypeConverter::with_base(RecordingBase::default());
        let token = String::from("1dh");
        let err = converter.convert_from(Source::new(&token)).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));
        assert_eq!(converter.base.calls.get(), 1);
    }

    #[test]
    fn successful_parse_skips_base() {
        let converter = TimeIntervalTypeConverter::with_base(RecordingBase::default());
        converter.convert_from(Source::new(&"3m")).unwrap();
        assert_eq!(converter.base.calls.get(), 0);
    }

    #[test]
    fn registry_binds_registered_types() {
        logger::init_for_tests();
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.can_convert::<TimeInterval, String>());
        assert!(!registry.can_convert::<TimeInterval, u64>());

        let interval: TimeInterval = registry.convert(&String::from("00:01:30")).unwrap();
        assert_eq!(interval.to_duration(), Duration::from_secs(90));

        assert_eq!(
            registry.convert::<Duration, _>(&"5s").unwrap_err(),
            ConversionError::NotRegistered {
                target: type_name::<Duration>()
            }
        );
    }

    #[test]
    fn registry_rejects_mismatched_output() {
        let mut registry = ConverterRegistry::new();
        registry.register::<u64>(TimeIntervalTypeConverter::<BaseConverter>::default());
        assert!(matches!(
            registry.convert::<u64, _>(&"5s"),
            Err(ConversionError::UnexpectedType { .. })
        ));
    }
}
