use super::errors::JsonError;
use serde::de::DeserializeOwned;
use std::io::Read;


/// Вычитывает reader целиком и десериализует в `T`
pub fn from_reader<T, R>(mut reader: R) -> Result<T, JsonError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(serde_json::from_slice(&buf)?)
}

/// То же самое, но результат кладется в уже существующее значение
pub fn read_into<T, R>(target: &mut T, mut reader: R) -> Result<(), JsonError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    *target = serde_json::from_slice(&buf)?;
    Ok(())
}
