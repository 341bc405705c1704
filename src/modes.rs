//! Operation modes selecting what a node computes.
//!
//! Modes are fixed when a node is constructed. Each enum parses from its
//! PascalCase name; the `Default` variant is the neutral fallback used when an
//! authored document names a mode that does not exist.

use std::str::FromStr;

use crate::error::GraphError;

macro_rules! operation_mode {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = GraphError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(GraphError::unknown_mode($kind, other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

operation_mode! {
    /// Direction of a gamma conversion.
    GammaMode, "Gamma", default = SrgbToLinear {
        LinearToSrgb => "LinearToSRGB",
        SrgbToLinear => "SRGBToLinear",
    }
}

operation_mode! {
    /// Attenuation curve of a light falloff node.
    FalloffMode, "LightFalloff", default = Constant {
        Quadratic => "Quadratic",
        Linear => "Linear",
        Constant => "Constant",
    }
}

operation_mode! {
    /// Which bounds a clamp node applies.
    ClampMode, "Clamp", default = MinMax {
        MinMax => "MinMax",
        MinOnly => "MinOnly",
        MaxOnly => "MaxOnly",
    }
}

operation_mode! {
    MathOperation, "Math", default = Add {
        Add => "Add",
        Subtract => "Subtract",
        Multiply => "Multiply",
        Divide => "Divide",
        Power => "Power",
        Modulo => "Modulo",
        Minimum => "Minimum",
        Maximum => "Maximum",
    }
}

operation_mode! {
    /// Blend mode of a color mix node.
    MixMode, "Mix", default = Mix {
        Mix => "Mix",
        Add => "Add",
        Multiply => "Multiply",
        Screen => "Screen",
        Subtract => "Subtract",
    }
}

operation_mode! {
    VectorOperation, "VectorMath", default = Add {
        Add => "Add",
        Subtract => "Subtract",
        CrossProduct => "CrossProduct",
        DotProduct => "DotProduct",
        Normalize => "Normalize",
    }
}

operation_mode! {
    /// Channel extracted by a separate color node.
    ColorChannel, "SeparateColor", default = Red {
        Red => "Red",
        Green => "Green",
        Blue => "Blue",
    }
}

impl ColorChannel {
    pub fn swizzle(self) -> char {
        match self {
            ColorChannel::Red => 'r',
            ColorChannel::Green => 'g',
            ColorChannel::Blue => 'b',
        }
    }
}
