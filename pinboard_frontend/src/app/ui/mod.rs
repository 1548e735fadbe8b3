mod gallery;
mod grid;
mod toolbar;
