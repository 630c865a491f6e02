mod disjoint_set;
mod kruskal;
mod wilson;
