use itertools::Itertools;

use crate::api::{RatingCount, Review, ReviewSummary};

/// Aggregates a book's reviews into the header figures shown above the list:
/// total count, one-decimal average and a per-star histogram, 5 stars first.
pub fn summarize(reviews: &[Review]) -> ReviewSummary {
    let counts = reviews.iter().counts_by(|review| review.rating);

    let rating_counts = (1..=5u8)
        .rev()
        .map(|stars| RatingCount {
            stars,
            count: counts.get(&stars).copied().unwrap_or_default() as u32,
        })
        .collect();

    let average_rating = if reviews.is_empty() {
        0.0
    } else {
        let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
        let average = f64::from(sum) / reviews.len() as f64;
        (average * 10.0).round() / 10.0
    };

    ReviewSummary {
        review_count: reviews.len() as u32,
        average_rating,
        rating_counts,
    }
}

#[cfg(test)]
mod review_summary_tests {
    use super::*;
    use crate::api::ReviewDraft;

    fn review(review_id: i32, rating: u8) -> Review {
        Review::from_draft(
            review_id,
            ReviewDraft {
                reviewer: "Reader".to_string(),
                rating,
                review: "Great book!".to_string(),
                pros: "".to_string(),
                cons: "".to_string(),
            },
            1700000000,
        )
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.review_count, 0);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.rating_counts.len(), 5);
        assert!(summary.rating_counts.iter().all(|bar| bar.count == 0));
    }

    #[test]
    /// 5, 4 and 4 stars average to 4.333.. which rounds to 4.3
    fn test_average_rounds_to_one_decimal() {
        let reviews = vec![review(1, 5), review(2, 4), review(3, 4)];
        let summary = summarize(&reviews);

        assert_eq!(summary.review_count, 3);
        assert_eq!(summary.average_rating, 4.3);
    }

    #[test]
    fn test_histogram_counts_per_star() {
        let reviews = vec![
            review(1, 5),
            review(2, 5),
            review(3, 3),
            review(4, 1),
            review(5, 3),
        ];
        let summary = summarize(&reviews);

        let stars: Vec<u8> = summary.rating_counts.iter().map(|bar| bar.stars).collect();
        assert_eq!(stars, vec![5, 4, 3, 2, 1]);

        let counts: Vec<u32> = summary.rating_counts.iter().map(|bar| bar.count).collect();
        assert_eq!(counts, vec![2, 0, 2, 0, 1]);
    }
}
