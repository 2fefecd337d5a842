use bitflags::bitflags;

use crate::shared_core_values::AtomicChannelState;

pub const CHANNEL_COUNT: usize = 4;

bitflags! {
    /// Receiver inputs as they appear in the port input register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReceiverPins: u8 {
        const CHANNEL_1 = 0b0001;
        const CHANNEL_2 = 0b0010;
        const CHANNEL_3 = 0b0100;
        const CHANNEL_4 = 0b1000;
    }
}

const CHANNEL_PINS: [ReceiverPins; CHANNEL_COUNT] = [
    ReceiverPins::CHANNEL_1,
    ReceiverPins::CHANNEL_2,
    ReceiverPins::CHANNEL_3,
    ReceiverPins::CHANNEL_4,
];

/// Measures the high time of four PWM receiver channels from pin change
/// interrupts.
///
/// The decoder is `Sync` and meant to be created once at startup and shared
/// by reference between the interrupt handler, the only writer, and the
/// control task, which reads [`ChannelDecoder::latest_pulses`].
pub struct ChannelDecoder {
    channels: [AtomicChannelState; CHANNEL_COUNT],
}

impl ChannelDecoder {
    pub const fn new() -> Self {
        ChannelDecoder {
            channels: [
                AtomicChannelState::new(),
                AtomicChannelState::new(),
                AtomicChannelState::new(),
                AtomicChannelState::new(),
            ],
        }
    }

    /// Pin change interrupt body. `pins` is the input register read once for
    /// this invocation and `now_us` the timestamp taken with it; every
    /// channel is evaluated against that same snapshot.
    pub fn on_pin_change(&self, pins: u8, now_us: u32) {
        let pins = ReceiverPins::from_bits_truncate(pins);
        for (channel, pin) in self.channels.iter().zip(CHANNEL_PINS) {
            let level = pins.contains(pin);
            let high = channel.is_high();
            if !high && level {
                channel.start_pulse(now_us);
            } else if high && !level {
                channel.finish_pulse(now_us);
            }
        }
    }

    /// Last complete pulse width of each channel in microseconds.
    pub fn latest_pulses(&self) -> [u32; CHANNEL_COUNT] {
        core::array::from_fn(|index| self.channels[index].pulse_width_us())
    }

    pub fn channel(&self, index: usize) -> Option<&AtomicChannelState> {
        self.channels.get(index)
    }
}

impl Default for ChannelDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_width_is_the_edge_delta() {
        let decoder = ChannelDecoder::new();

        decoder.on_pin_change(0b0001, 10_000);
        decoder.on_pin_change(0b0000, 11_532);

        assert_eq!(decoder.latest_pulses(), [1532, 0, 0, 0]);
    }

    #[test]
    fn interleaved_channels_are_decoded_independently() {
        let decoder = ChannelDecoder::new();

        decoder.on_pin_change(0b0011, 1_000);
        decoder.on_pin_change(0b0111, 1_100);
        decoder.on_pin_change(0b0101, 2_500);
        decoder.on_pin_change(0b1101, 2_600);
        decoder.on_pin_change(0b1000, 3_000);
        decoder.on_pin_change(0b0000, 3_700);

        assert_eq!(decoder.latest_pulses(), [2_000, 1_500, 1_900, 1_100]);
    }

    #[test]
    fn falling_edge_without_rising_edge_is_ignored() {
        let decoder = ChannelDecoder::new();
        decoder.on_pin_change(0b0000, 500);
        assert_eq!(decoder.latest_pulses(), [0; 4]);

        decoder.on_pin_change(0b0100, 1_000);
        decoder.on_pin_change(0b0000, 2_200);
        decoder.on_pin_change(0b0000, 9_000);

        assert_eq!(decoder.latest_pulses(), [0, 0, 1_200, 0]);
    }

    #[test]
    fn repeated_high_level_keeps_the_first_rising_edge() {
        let decoder = ChannelDecoder::new();

        decoder.on_pin_change(0b0010, 1_000);
        decoder.on_pin_change(0b0010, 1_400);
        decoder.on_pin_change(0b0000, 2_000);

        assert_eq!(decoder.latest_pulses()[1], 1_000);
    }

    #[test]
    fn pulse_in_progress_keeps_the_previous_width() {
        let decoder = ChannelDecoder::new();
        decoder.on_pin_change(0b1000, 0);
        decoder.on_pin_change(0b0000, 1_750);

        decoder.on_pin_change(0b1000, 20_000);

        assert_eq!(decoder.latest_pulses()[3], 1_750);
        assert!(decoder.channel(3).unwrap().is_high());
    }

    #[test]
    fn timestamps_wrap_around() {
        let decoder = ChannelDecoder::new();

        decoder.on_pin_change(0b0001, u32::MAX - 100);
        decoder.on_pin_change(0b0000, 1_400);

        assert_eq!(decoder.latest_pulses()[0], 1_501);
    }

    #[test]
    fn bits_above_the_four_channels_are_ignored() {
        let decoder = ChannelDecoder::new();

        decoder.on_pin_change(0b1111_0000, 100);
        decoder.on_pin_change(0b0000_0000, 200);

        assert_eq!(decoder.latest_pulses(), [0; 4]);
        assert!(decoder.channel(4).is_none());
    }

    #[test]
    fn reader_only_sees_complete_widths() {
        let decoder = ChannelDecoder::new();
        let widths = [0x0000_FFFF_u32, 0x0001_0000];

        std::thread::scope(|scope| {
            scope.spawn(|| {
                let mut now = 0_u32;
                for round in 0..20_000 {
                    decoder.on_pin_change(0b1111, now);
                    now = now.wrapping_add(widths[round % 2]);
                    decoder.on_pin_change(0b0000, now);
                    now = now.wrapping_add(100);
                }
            });
            scope.spawn(|| {
                for _ in 0..20_000 {
                    for width in decoder.latest_pulses() {
                        assert!(width == 0 || widths.contains(&width));
                    }
                }
            });
        });
    }
}
