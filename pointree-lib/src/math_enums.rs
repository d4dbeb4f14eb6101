use std::ops::{Index, IndexMut};

use enum_map::Enum;
use enumset::{EnumSet, EnumSetType};
use glam::{BVec3, DVec3};

macro_rules! impl_index_for_vec {
    { $axis_type:ident for $base_type:ident: $vector_type:ident {
        $( $axis_name:ident => $axis_field:ident, )*
    } } => {
        impl Index<$axis_type> for $vector_type {
            type Output = $base_type;

            fn index(&self, index: $axis_type) -> &Self::Output {
                match index {
                    $( $axis_type::$axis_name => &self.$axis_field, )*
                }
            }
        }

        impl IndexMut<$axis_type> for $vector_type {
            fn index_mut(&mut self, index: $axis_type) -> &mut Self::Output {
                match index {
                    $( $axis_type::$axis_name => &mut self.$axis_field, )*
                }
            }
        }
    };
    { $axis_type:ident for [
        $( $base_type:ident: $( $vector_type:ident ),* ; )*
    ] $axes:tt } => { $( $(
        impl_index_for_vec! {
            $axis_type for $base_type: $vector_type
            $axes
        }
    )* )* };
}

/// A three-dimensional axis; `X`, `Y`, or `Z`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Enum, EnumSetType)]
#[enumset(no_super_impls)]
pub enum Axis3 {
    X,
    Y,
    Z,
}

impl Axis3 {
    /// The bit that represents this axis within an [`Octant`] code.
    ///
    /// `X` is the most significant of the three bits, `Z` the least significant.
    pub const fn octant_bit(self) -> u8 {
        match self {
            Self::X => 0b100,
            Self::Y => 0b010,
            Self::Z => 0b001,
        }
    }
}

impl_index_for_vec! {
    Axis3 for [
        f64: DVec3;
        bool: BVec3;
    ] {
        X => x,
        Y => y,
        Z => z,
    }
}

/// A set of three-dimensional axes.
pub type Axes3 = EnumSet<Axis3>;

/// One of the eight cubes resulting from splitting a cube through its center along all axes.
///
/// Variants are named after the side of the center they lie on, `0` being the negative and `1` the
/// positive side. The declaration order matches [`Octant::code`], so `X0Y0Z0` is code `0` and
/// `X1Y1Z1` is code `7`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Enum, EnumSetType)]
#[enumset(no_super_impls)]
pub enum Octant {
    X0Y0Z0,
    X0Y0Z1,
    X0Y1Z0,
    X0Y1Z1,
    X1Y0Z0,
    X1Y0Z1,
    X1Y1Z0,
    X1Y1Z1,
}

impl Octant {
    /// All octants in ascending order of their code.
    pub const ALL: [Self; 8] = [
        Self::X0Y0Z0,
        Self::X0Y0Z1,
        Self::X0Y1Z0,
        Self::X0Y1Z1,
        Self::X1Y0Z0,
        Self::X1Y0Z1,
        Self::X1Y1Z0,
        Self::X1Y1Z1,
    ];

    /// Determines which octant around `center` the given `point` lies in.
    ///
    /// An axis counts as positive if `point >= center` along it, so points lying exactly on a
    /// splitting plane end up on the positive side. In particular, `center` itself is always
    /// classified as [`Octant::X1Y1Z1`].
    ///
    /// ```
    /// # use glam::DVec3;
    /// # use pointree_lib::math_enums::Octant;
    /// let center = DVec3::new(0.5, 0.5, 0.0);
    /// assert_eq!(Octant::classify(DVec3::new(0.0, 0.0, 0.0), center), Octant::X0Y0Z1);
    /// assert_eq!(Octant::classify(center, center), Octant::X1Y1Z1);
    /// ```
    pub fn classify(point: DVec3, center: DVec3) -> Self {
        Self::from_positive_axes(
            Axes3::all()
                .iter()
                .filter(|&axis| point[axis] >= center[axis])
                .collect(),
        )
    }

    /// Returns the octant code in the range `0..8`.
    ///
    /// Bit 2 is set for positive `X`, bit 1 for positive `Y` and bit 0 for positive `Z`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the octant with the given code.
    ///
    /// Returns [`None`] if `code` is not in the range `0..8`.
    pub const fn from_code(code: u8) -> Option<Self> {
        if code < 8 {
            Some(Self::from_masked_code(code))
        } else {
            None
        }
    }

    /// Returns the octant that lies on the positive side for exactly the given `axes`.
    pub fn from_positive_axes(axes: Axes3) -> Self {
        Self::from_masked_code(axes.iter().map(Axis3::octant_bit).sum())
    }

    /// Returns the set of axes along which this octant lies on the positive side.
    pub fn positive_axes(self) -> Axes3 {
        Axes3::all()
            .iter()
            .filter(|&axis| self.is_positive(axis))
            .collect()
    }

    /// Whether this octant lies on the positive side along the given `axis`.
    pub const fn is_positive(self, axis: Axis3) -> bool {
        self.code() & axis.octant_bit() != 0
    }

    /// Returns the octant mirrored along the given `axis`.
    ///
    /// E.g. flipping [`Octant::X0Y0Z0`] along [`Axis3::X`] returns [`Octant::X1Y0Z0`].
    pub const fn flipped(self, axis: Axis3) -> Self {
        Self::from_masked_code(self.code() ^ axis.octant_bit())
    }

    /// Returns `-1.0` or `1.0` for each axis, depending on the side this octant lies on.
    pub fn signs(self) -> DVec3 {
        DVec3::select(
            BVec3::new(
                self.is_positive(Axis3::X),
                self.is_positive(Axis3::Y),
                self.is_positive(Axis3::Z),
            ),
            DVec3::ONE,
            DVec3::NEG_ONE,
        )
    }

    /// Converts the lowest three bits of `code` into an [`Octant`].
    const fn from_masked_code(code: u8) -> Self {
        match code & 0b111 {
            0 => Self::X0Y0Z0,
            1 => Self::X0Y0Z1,
            2 => Self::X0Y1Z0,
            3 => Self::X0Y1Z1,
            4 => Self::X1Y0Z0,
            5 => Self::X1Y0Z1,
            6 => Self::X1Y1Z0,
            7 => Self::X1Y1Z1,
            _ => unreachable!(), // should get optimized away
        }
    }
}

/// A set of octants.
pub type Octants = EnumSet<Octant>;
