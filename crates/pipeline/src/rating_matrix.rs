//! Dense user×title rating matrix.

use crate::error::{BuildError, Result};
use data_loader::{TitledRating, UserId};
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Pivot of the titled ratings: one row per user, one column per distinct title
///
/// Titles and users are sorted ascending. A user who rated the same title
/// more than once gets the mean of those ratings; unrated cells are 0.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    titles: Vec<String>,
    users: Vec<UserId>,
    values: Array2<f64>,
}

impl RatingMatrix {
    pub fn from_ratings(ratings: &[TitledRating]) -> Result<Self> {
        if ratings.is_empty() {
            return Err(BuildError::EmptyRatings);
        }

        let titles: Vec<String> = ratings
            .iter()
            .map(|r| r.title.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let users: Vec<UserId> = ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let title_column: HashMap<&str, usize> =
            titles.iter().enumerate().map(|(i, t)| (t.as_str(), i)).collect();
        let user_row: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, &u)| (u, i)).collect();

        let mut cells: HashMap<(usize, usize), (f64, u32)> = HashMap::new();
        for rating in ratings {
            let key = (user_row[&rating.user_id], title_column[rating.title.as_str()]);
            let cell = cells.entry(key).or_insert((0.0, 0));
            cell.0 += f64::from(rating.rating);
            cell.1 += 1;
        }

        let duplicates = ratings.len() - cells.len();
        if duplicates > 0 {
            debug!("Averaged {} duplicate user/title ratings", duplicates);
        }

        let mut values = Array2::<f64>::zeros((users.len(), titles.len()));
        for ((row, column), (sum, count)) in cells {
            values[[row, column]] = sum / f64::from(count);
        }

        Ok(Self { titles, users, values })
    }

    /// Distinct raw titles in column order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// user×title values
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// title×user view, one row per title
    pub fn item_user(&self) -> Array2<f64> {
        self.values.t().to_owned()
    }

    pub fn into_titles(self) -> Vec<String> {
        self.titles
    }
}
