use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::expression::{Field, Predicate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullsOrder {
    /// Whatever the backend does.
    #[default]
    Default,
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
    pub field: Field,
    pub direction: SortDirection,
    pub nulls: NullsOrder,
}

impl OrderSpec {
    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullsOrder::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullsOrder::Last;
        self
    }
}

impl Field {
    pub fn asc(self) -> OrderSpec {
        OrderSpec {
            field: self,
            direction: SortDirection::Asc,
            nulls: NullsOrder::Default,
        }
    }

    pub fn desc(self) -> OrderSpec {
        OrderSpec {
            field: self,
            direction: SortDirection::Desc,
            nulls: NullsOrder::Default,
        }
    }
}

/// How the team relation is joined to the member rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    /// Members without a team are kept with empty team columns.
    #[default]
    Left,
    Inner,
}

/// Everything the storage layer needs to run one listing query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectQuery {
    pub predicate: Predicate,
    pub join: JoinKind,
    /// Extra restriction placed on the team join itself. With a left join,
    /// members whose team fails it are kept with empty team columns.
    pub join_on: Predicate,
    /// Empty means member id ascending.
    pub order: Vec<OrderSpec>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl SelectQuery {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            ..Default::default()
        }
    }

    pub fn join(mut self, join: JoinKind) -> Self {
        self.join = join;
        self
    }

    pub fn join_on(mut self, on: Predicate) -> Self {
        self.join_on = on;
        self
    }

    pub fn order_by(mut self, order: OrderSpec) -> Self {
        self.order.push(order);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
