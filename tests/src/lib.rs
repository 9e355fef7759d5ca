#[cfg(test)]
mod utils;

#[cfg(test)]
mod probing {
    mod integration;
}

#[cfg(test)]
mod arp {
    mod integration;
}

#[cfg(test)]
mod firewall {
    mod integration;
}
