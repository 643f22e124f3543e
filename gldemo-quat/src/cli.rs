use clap::Parser;
use gldemo_data::Quaternion;

#[derive(Parser, Debug)]
#[command(name = "quat", about = "Multiplies two quaternions and prints the operands and the result")]
pub struct Cli {
    /// Left operand, four comma-separated components with the scalar first
    #[arg(long, default_value = "2,3,4,5", value_name = "Q", allow_hyphen_values = true)]
    pub lhs: Quaternion,

    /// Right operand
    #[arg(long, default_value = "3,4,5,6", value_name = "Q", allow_hyphen_values = true)]
    pub rhs: Quaternion,

    /// Print plain text without colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The product `lhs * rhs`, computed in place on a copy of `lhs`.
    pub fn product(&self) -> Quaternion {
        let mut result = self.lhs;
        result.apply(&self.rhs);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["quat"]).unwrap();

        assert_eq!(cli.lhs, Quaternion::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(cli.rhs, Quaternion::new(3.0, 4.0, 5.0, 6.0));
        assert_eq!(cli.product().to_string(), "(-56,16,24,26)");
    }

    #[test]
    fn test_custom_operands() {
        let cli = Cli::try_parse_from(["quat", "--lhs", "0,1,0,0", "--rhs", "0,0,1,0"]).unwrap();
        assert_eq!(cli.product(), Quaternion::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_negative_components() {
        let cli = Cli::try_parse_from(["quat", "--lhs", "-1,0,0,0"]).unwrap();
        assert_eq!(cli.lhs, Quaternion::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_rejects_short_quaternion() {
        assert!(Cli::try_parse_from(["quat", "--rhs", "1,2,3"]).is_err());
    }
}
