//! FEN validation.
//!
//! The standard rule set runs before every decode. The checks are ordered and
//! fail fast: the first violated rule is the one reported.
//!
//! 1. six-field shape (pattern match)
//! 2. exactly 8 ranks
//! 3. every rank expands to 8 files
//! 4. no consecutive digits inside a rank
//! 5. exactly one king per color
//! 6. at most 8 pawns per color
//! 7. no pawns on rank 1 or rank 8
//! 8. an en passant square requires a halfmove clock of 0
//! 9. halfmove clock bounded by the half moves played so far
//! 10. fullmove number at least 1
//!
//! Passing these rules does not make a position reachable. The strict mode adds
//! the cheap reachability checks (king distance, checks, castling rights and
//! en passant provenance); pawn-structure and promotion-count reachability are
//! not checked in either mode.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::FenError;
use super::{Color, Piece, Position, Square};

static FEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([rnbqkpRNBQKP1-8]+/){0,7}[rnbqkpRNBQKP1-8]+ [wb] (-|KQ?k?q?|K?Qk?q?|K?Q?kq?|K?Q?k?q) (-|[a-h][36]) \d+ \d+$",
    )
    .expect("FEN pattern compiles")
});

/// How much legality checking a [`FenValidator`] performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Structural and counting rules only
    #[default]
    Standard,
    /// Standard rules plus position reachability checks
    Strict,
}

/// FEN validator with a configurable rule set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FenValidator {
    mode: ValidationMode,
}

impl FenValidator {
    #[must_use]
    pub const fn standard() -> Self {
        FenValidator {
            mode: ValidationMode::Standard,
        }
    }

    #[must_use]
    pub const fn strict() -> Self {
        FenValidator {
            mode: ValidationMode::Strict,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validate a FEN string, reporting the first violated rule.
    pub fn validate(&self, fen: &str) -> Result<(), FenError> {
        let fen = fen.trim();
        check_standard_rules(fen)?;
        if self.mode == ValidationMode::Strict {
            let position = Position::decode_fields(fen)?;
            check_reachability(&position)?;
        }
        Ok(())
    }
}

/// Validate a FEN string against the standard rule set.
///
/// # Example
/// ```
/// use mailbox_chess::board::validate_fen;
///
/// assert!(validate_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_ok());
/// assert!(validate_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
/// ```
pub fn validate_fen(fen: &str) -> Result<(), FenError> {
    FenValidator::standard().validate(fen)
}

fn parse_counter(field: &'static str, value: &str) -> Result<u32, FenError> {
    value.parse().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_string(),
    })
}

fn check_standard_rules(fen: &str) -> Result<(), FenError> {
    if !FEN_PATTERN.is_match(fen) {
        return Err(FenError::Malformed {
            fen: fen.to_string(),
        });
    }

    let fields: Vec<&str> = fen.split(' ').collect();
    let placement = fields[0];
    let black_to_move = fields[1] == "b";
    let en_passant = fields[3];
    let halfmove = parse_counter("halfmove clock", fields[4])?;
    let fullmove = parse_counter("fullmove number", fields[5])?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    // FEN lists rank 8 first
    for (i, rank) in ranks.iter().enumerate() {
        let files: usize = rank
            .chars()
            .map(|c| c.to_digit(10).map_or(1, |d| d as usize))
            .sum();
        if files != 8 {
            return Err(FenError::RankWidth { rank: 8 - i, files });
        }
    }

    for (i, rank) in ranks.iter().enumerate() {
        let bytes = rank.as_bytes();
        if bytes
            .windows(2)
            .any(|pair| pair[0].is_ascii_digit() && pair[1].is_ascii_digit())
        {
            return Err(FenError::ConsecutiveDigits { rank: 8 - i });
        }
    }

    let count = |c: char| placement.chars().filter(|&x| x == c).count();

    let (white_kings, black_kings) = (count('K'), count('k'));
    if white_kings != 1 || black_kings != 1 {
        return Err(FenError::KingCount {
            white: white_kings,
            black: black_kings,
        });
    }

    let (white_pawns, black_pawns) = (count('P'), count('p'));
    if white_pawns > 8 || black_pawns > 8 {
        return Err(FenError::TooManyPawns {
            white: white_pawns,
            black: black_pawns,
        });
    }

    let has_pawn = |rank: &str| rank.contains(['p', 'P']);
    if has_pawn(ranks[0]) || has_pawn(ranks[7]) {
        return Err(FenError::PawnOnBackRank);
    }

    if en_passant != "-" && halfmove != 0 {
        return Err(FenError::EnPassantClock { halfmove });
    }

    let max = (i64::from(fullmove) - 1) * 2 + i64::from(black_to_move);
    if i64::from(halfmove) > max {
        return Err(FenError::ClockBound { halfmove, max });
    }

    if fullmove < 1 {
        return Err(FenError::FullmoveZero);
    }

    Ok(())
}

fn check_reachability(position: &Position) -> Result<(), FenError> {
    let to_move = position.side_to_move();
    let (Some(white_king), Some(black_king)) = (
        position.king_square(Color::White),
        position.king_square(Color::Black),
    ) else {
        // rule 5 already guarantees both kings
        return Err(FenError::KingCount { white: 0, black: 0 });
    };

    if white_king.file().abs_diff(black_king.file()) <= 1
        && white_king.rank().abs_diff(black_king.rank()) <= 1
    {
        return Err(FenError::KingsAdjacent);
    }

    if position.is_in_check(to_move.opponent()) {
        return Err(FenError::OpponentInCheck);
    }

    let own_king = if to_move == Color::White {
        white_king
    } else {
        black_king
    };
    let checkers = position.attackers_count(own_king, to_move.opponent());
    if checkers > 2 {
        return Err(FenError::TooManyCheckers { count: checkers });
    }

    check_castling_rights(position)?;
    check_en_passant_provenance(position)
}

fn check_castling_rights(position: &Position) -> Result<(), FenError> {
    let rights = position.castling_rights();
    let homes = [
        (Color::White, true, 'K', Square::E1, Square::H1),
        (Color::White, false, 'Q', Square::E1, Square::A1),
        (Color::Black, true, 'k', Square::E8, Square::H8),
        (Color::Black, false, 'q', Square::E8, Square::A8),
    ];
    for (color, kingside, right, king_home, rook_home) in homes {
        if rights.has(color, kingside)
            && (!position.cell(king_home).is(color, Piece::King)
                || !position.cell(rook_home).is(color, Piece::Rook))
        {
            return Err(FenError::CastlingMismatch { right });
        }
    }
    Ok(())
}

fn check_en_passant_provenance(position: &Position) -> Result<(), FenError> {
    let Some(ep) = position.en_passant() else {
        return Ok(());
    };
    let mover = position.side_to_move().opponent();
    let expected_rank = if mover == Color::White { 2 } else { 5 };
    let step = mover.pawn_step();

    let pushed_pawn = ep.offset(step);
    let origin = ep.offset(-step);
    let plausible = ep.rank() == expected_rank
        && position.is_empty(ep)
        && origin.is_some_and(|sq| position.is_empty(sq))
        && pushed_pawn.is_some_and(|sq| position.cell(sq).is(mover, Piece::Pawn));

    if plausible {
        Ok(())
    } else {
        Err(FenError::EnPassantProvenance {
            square: ep.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_accepts_start_position() {
        assert_eq!(validate_fen(START), Ok(()));
        assert_eq!(FenValidator::strict().validate(START), Ok(()));
    }

    #[test]
    fn test_accepts_surrounding_whitespace() {
        assert_eq!(validate_fen(&format!("  {START}\n")), Ok(()));
    }

    #[test]
    fn test_rule_1_shape() {
        let cases = [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w QK - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1",
            "rnbqkbnr/pppxpppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ];
        for fen in cases {
            assert!(
                matches!(validate_fen(fen), Err(FenError::Malformed { .. })),
                "{fen:?} should fail the pattern"
            );
        }
    }

    #[test]
    fn test_counter_overflow() {
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 99999999999";
        assert!(matches!(
            validate_fen(fen),
            Err(FenError::InvalidCounter { .. })
        ));
    }

    #[test]
    fn test_rule_2_rank_count() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(validate_fen(fen), Err(FenError::RankCount { found: 7 }));
    }

    #[test]
    fn test_rule_3_rank_width() {
        let nine = "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(
            validate_fen(nine),
            Err(FenError::RankWidth { rank: 7, files: 9 })
        );
        let seven = "rnbqkbnr/pppppppp/8/8/7/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(
            validate_fen(seven),
            Err(FenError::RankWidth { rank: 4, files: 7 })
        );
    }

    #[test]
    fn test_rule_4_consecutive_digits() {
        let fen = "rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(
            validate_fen(fen),
            Err(FenError::ConsecutiveDigits { rank: 6 })
        );
    }

    #[test]
    fn test_rule_5_kings() {
        assert_eq!(
            validate_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::KingCount { white: 0, black: 0 })
        );
        assert_eq!(
            validate_fen("k7/8/8/8/8/8/8/KK6 w - - 0 1"),
            Err(FenError::KingCount { white: 2, black: 1 })
        );
    }

    #[test]
    fn test_rule_6_pawn_count() {
        let fen = "4k3/8/8/8/8/P7/PPPPPPPP/4K3 w - - 0 1";
        assert_eq!(
            validate_fen(fen),
            Err(FenError::TooManyPawns { white: 9, black: 0 })
        );
    }

    #[test]
    fn test_rule_7_back_rank_pawns() {
        assert_eq!(
            validate_fen("4k2P/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::PawnOnBackRank)
        );
        assert_eq!(
            validate_fen("4k3/8/8/8/8/8/8/p3K3 w - - 0 1"),
            Err(FenError::PawnOnBackRank)
        );
    }

    #[test]
    fn test_rule_8_en_passant_clock() {
        let fen = "rnbqkbnr/pppppppp/8/8/P7/8/1PPPPPPP/RNBQKBNR b KQkq a3 1 1";
        assert_eq!(
            validate_fen(fen),
            Err(FenError::EnPassantClock { halfmove: 1 })
        );
    }

    #[test]
    fn test_rule_9_clock_bound() {
        assert_eq!(
            validate_fen("4k3/8/8/8/8/8/8/4K3 w - - 1 1"),
            Err(FenError::ClockBound {
                halfmove: 1,
                max: 0
            })
        );
        assert_eq!(validate_fen("4k3/8/8/8/8/8/8/4K3 b - - 1 1"), Ok(()));
        assert_eq!(validate_fen("4k3/8/8/8/8/8/8/4K3 w - - 20 11"), Ok(()));
    }

    #[test]
    fn test_fullmove_zero_trips_clock_bound_first() {
        // the clock bound is negative for fullmove 0, so rule 9 reports it
        assert_eq!(
            validate_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 0"),
            Err(FenError::ClockBound {
                halfmove: 0,
                max: -1
            })
        );
    }

    #[test]
    fn test_first_violation_wins() {
        // no kings and too many pawns: the king rule is checked first
        let fen = "8/pppppppp/p7/8/8/8/8/8 w - - 0 1";
        assert!(matches!(
            validate_fen(fen),
            Err(FenError::KingCount { .. })
        ));
    }

    #[test]
    fn test_strict_kings_adjacent() {
        let fen = "8/8/8/8/8/8/8/Kk6 w - - 0 1";
        assert_eq!(validate_fen(fen), Ok(()));
        assert_eq!(
            FenValidator::strict().validate(fen),
            Err(FenError::KingsAdjacent)
        );
    }

    #[test]
    fn test_strict_opponent_in_check() {
        // Black king attacked by the rook while White is to move
        let fen = "4k3/8/8/8/8/8/8/4RK2 w - - 0 1";
        assert_eq!(validate_fen(fen), Ok(()));
        assert_eq!(
            FenValidator::strict().validate(fen),
            Err(FenError::OpponentInCheck)
        );
    }

    #[test]
    fn test_strict_triple_check() {
        // e-file rook and d6 knight: a legal double check
        let double = "r3k3/8/3N4/8/8/8/8/4RK2 b - - 0 1";
        assert_eq!(FenValidator::strict().validate(double), Ok(()));

        let triple = "4k3/8/3N2B1/8/8/8/8/4RK2 b - - 0 1";
        assert_eq!(
            FenValidator::strict().validate(triple),
            Err(FenError::TooManyCheckers { count: 3 })
        );
    }

    #[test]
    fn test_strict_castling_mismatch() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1";
        assert_eq!(validate_fen(fen), Ok(()));
        assert_eq!(
            FenValidator::strict().validate(fen),
            Err(FenError::CastlingMismatch { right: 'K' })
        );
    }

    #[test]
    fn test_strict_en_passant_provenance() {
        let good = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(FenValidator::strict().validate(good), Ok(()));

        let no_pawn = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(validate_fen(no_pawn), Ok(()));
        assert_eq!(
            FenValidator::strict().validate(no_pawn),
            Err(FenError::EnPassantProvenance {
                square: "e3".to_string()
            })
        );

        let wrong_side = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1";
        assert!(matches!(
            FenValidator::strict().validate(wrong_side),
            Err(FenError::EnPassantProvenance { .. })
        ));
    }
}
