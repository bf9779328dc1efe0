pub mod predictive_search;
