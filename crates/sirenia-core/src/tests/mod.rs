mod config;
mod diagnostics;
mod geometry;
mod markup;
mod svgroot;
