/// Zero value типа `T`
#[inline(always)]
pub fn zero<T: Default>() -> T {
    T::default()
}

/// Тернарный выбор: `either(cond, a, b)` вместо `if cond { a } else { b }`
///
/// Оба значения вычисляются до вызова — не использовать с дорогими
/// выражениями.
#[inline(always)]
pub fn either<T>(cond: bool, when_true: T, when_false: T) -> T {
    if cond {
        when_true
    } else {
        when_false
    }
}
