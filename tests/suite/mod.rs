mod arithmetic;
mod budget;
mod constants;
mod exact;
