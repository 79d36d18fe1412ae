/// Macro to help with defining the per-kind symbol counters.
///
/// The kind type must be a fieldless `#[repr(u8)]` enum with an `ALL` constant
/// listing every variant in discriminant order.
macro_rules! symbol_counter {
    ($name:ident, $kind:ty, $len:expr) => {
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        pub struct $name {
            counts: [u32; $len],
        }

        impl $name {
            /// Creates a counter where every kind is zero.
            pub fn new() -> Self {
                Self { counts: [0; $len] }
            }

            pub fn get(self, kind: $kind) -> u32 {
                self.counts[kind as usize]
            }

            #[must_use] // Because users might expect this to be a mutating method
            pub fn with(self, kind: $kind, count: u32) -> Self {
                let mut counts = self.counts;
                counts[kind as usize] = count;
                Self { counts }
            }

            /// Pointwise sum.
            #[must_use]
            pub fn add(self, other: Self) -> Self {
                let mut counts = self.counts;
                for (c, o) in counts.iter_mut().zip(other.counts) {
                    *c += o;
                }
                Self { counts }
            }

            /// Pointwise difference, clamped at zero per kind.
            #[must_use]
            pub fn subtract(self, other: Self) -> Self {
                let mut counts = self.counts;
                for (c, o) in counts.iter_mut().zip(other.counts) {
                    *c = c.saturating_sub(o);
                }
                Self { counts }
            }

            pub fn total(self) -> u32 {
                self.counts.iter().sum()
            }

            /// Is every kind's count at least as large as in `other`?
            pub fn includes(self, other: Self) -> bool {
                self.counts.iter().zip(other.counts).all(|(&c, o)| c >= o)
            }

            pub fn is_empty(self) -> bool {
                self.counts.iter().all(|&c| c == 0)
            }

            /// The kinds with a non-zero count, in declaration order.
            pub fn iter(self) -> impl Iterator<Item = ($kind, u32)> {
                <$kind>::ALL
                    .into_iter()
                    .map(move |kind| (kind, self.counts[kind as usize]))
                    .filter(|&(_, count)| count > 0)
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                $name::add(self, rhs)
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                self.subtract(rhs)
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = $name::add(*self, rhs);
            }
        }

        impl std::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                *self = self.subtract(rhs);
            }
        }

        impl FromIterator<($kind, u32)> for $name {
            fn from_iter<I: IntoIterator<Item = ($kind, u32)>>(iter: I) -> Self {
                let mut counts = [0; $len];
                for (kind, count) in iter {
                    counts[kind as usize] += count;
                }
                Self { counts }
            }
        }
    };
}
pub(crate) use symbol_counter;
