//! Stats module - Aggregations and distributions behind the charts

mod aggregates;
mod distribution;

pub use aggregates::{
    split_list, top_n, AggregateCalculator, AggregateSettings, Aggregates, CategoryCount,
    DurationDistributions, SeasonCount, TypeSeries, YearlyAdditions,
};
pub use distribution::{DistributionCalculator, Histogram, HistogramBin};
