use super::random::{FastRand, RandSource};
use std::fmt;


pub const UID_LEN: usize = 16;

// Не менять: генерация индексирует таблицу 6-битными значениями,
// ровно 64 символа
const RAND_CHARS: &[u8; 64] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-";

/// Короткий идентификатор фиксированной длины из URL-safe алфавита
///
/// Никак не связан с UUID из rfc4122. Генерация предсказуема и НЕ пригодна
/// для криптографических применений. Кодовое пространство 64^16 дает ~10%
/// вероятность первой коллизии после ~1.3e14 генераций и ~50% после ~3.3e14.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid([u8; UID_LEN]);

impl Uid {
    /// Идентификатор от общего на процесс источника
    pub fn random() -> Self {
        Self::generate(FastRand::global())
    }

    /// Идентификатор от инжектированного источника (детерминируемо в тестах)
    pub fn generate(rng: &impl RandSource) -> Self {
        let mut uid = Uid([0; UID_LEN]);
        uid.regenerate(rng);
        uid
    }

    /// Перезаполняет существующий буфер — позволяет быстро генерировать
    /// идентификаторы, переиспользуя старые
    pub fn regenerate(&mut self, rng: &impl RandSource) {
        let rnd1 = rng.next_u32();
        let rnd2 = rng.next_u32();
        let rnd3 = rng.next_u32();

        for (chunk, rnd) in [rnd1, rnd2, rnd3].into_iter().enumerate() {
            for pos in 0..5 {
                self.0[chunk * 5 + pos] = RAND_CHARS[((rnd >> (6 * pos)) & 63) as usize];
            }
        }

        // У каждого из трех чисел остаются биты 30 и 31 — из них собирается
        // шестнадцатый символ
        let tail = ((rnd1 >> 30) & 3) | (((rnd2 >> 30) & 3) << 2) | (((rnd3 >> 30) & 3) << 4);
        self.0[15] = RAND_CHARS[tail as usize];
    }

    /// Первые 16 байт строки как идентификатор, без валидации содержимого
    pub fn parse(s: &str) -> Option<Uid> {
        let bytes = s.as_bytes();
        if bytes.len() < UID_LEN {
            return None;
        }
        let mut buf = [0u8; UID_LEN];
        buf.copy_from_slice(&bytes[..UID_LEN]);
        Some(Uid(buf))
    }

    /// Проверка, что все символы из рабочего алфавита
    ///
    /// Нужна только для валидации недоверенного входа (XSS, SQL injection и
    /// т.п.) — свои идентификаторы принимайте как есть.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|&b| {
            b.is_ascii_lowercase()
                || b.is_ascii_uppercase()
                || b.is_ascii_digit()
                || b == b'_'
                || b == b'-'
        })
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; UID_LEN] {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // parse() не валидирует вход, поэтому пишем через lossy
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid(\"{self}\")")
    }
}
