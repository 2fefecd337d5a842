/// Free running microsecond counter. Wraps around at `u32::MAX`, so callers
/// compare timestamps with `wrapping_sub`.
pub trait Clock {
    fn now_us(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn now_us(&self) -> u32 {
        self()
    }
}

pub fn elapsed_us(since: u32, now: u32) -> u32 {
    now.wrapping_sub(since)
}
