mod details;
mod filters;
mod panels;
