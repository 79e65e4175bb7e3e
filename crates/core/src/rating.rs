//! Aggregate product rating computed from moderated reviews.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::review::REVIEW_STATUS_APPROVED;

/// The `(rating, review_count)` pair cached on a product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingAggregate {
    /// Mean star rating, rounded to two decimal places.
    pub rating: Decimal,
    pub review_count: i32,
}

/// Mean and count over the `approved` entries of `(status, rating)` pairs.
///
/// Returns `None` when no approved review exists; callers leave the cached
/// columns untouched in that case.
pub fn aggregate_ratings<'a, I>(reviews: I) -> Option<RatingAggregate>
where
    I: IntoIterator<Item = (&'a str, i16)>,
{
    let (sum, count) = reviews
        .into_iter()
        .filter(|(status, _)| *status == REVIEW_STATUS_APPROVED)
        .fold((0i64, 0i32), |(sum, count), (_, rating)| {
            (sum + i64::from(rating), count + 1)
        });

    if count == 0 {
        return None;
    }

    let mean = (Decimal::from(sum) / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Some(RatingAggregate {
        rating: mean,
        review_count: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_approved_reviews() {
        let agg = aggregate_ratings([("approved", 5), ("approved", 4), ("approved", 3)])
            .expect("approved reviews present");
        assert_eq!(agg.rating, Decimal::from(4));
        assert_eq!(agg.review_count, 3);
    }

    #[test]
    fn pending_and_rejected_are_ignored() {
        let agg = aggregate_ratings([
            ("approved", 5),
            ("approved", 4),
            ("approved", 3),
            ("pending", 1),
            ("rejected", 1),
            ("spam", 1),
        ])
        .expect("approved reviews present");
        assert_eq!(agg.rating, Decimal::from(4));
        assert_eq!(agg.review_count, 3);
    }

    #[test]
    fn rounds_to_two_places() {
        let agg = aggregate_ratings([("approved", 5), ("approved", 4), ("approved", 4)]).unwrap();
        assert_eq!(agg.rating, Decimal::new(433, 2));
    }

    #[test]
    fn no_approved_reviews_yields_none() {
        assert_eq!(aggregate_ratings([("pending", 5)]), None);
        assert_eq!(aggregate_ratings(std::iter::empty::<(&str, i16)>()), None);
    }
}
