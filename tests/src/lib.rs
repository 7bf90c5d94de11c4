#[cfg(test)]
mod utils;

#[cfg(test)]
mod import {
    mod integration;
}
